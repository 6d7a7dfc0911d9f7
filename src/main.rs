fn main() -> anyhow::Result<()> {
    rr_cli::bootstrap::run()
}
