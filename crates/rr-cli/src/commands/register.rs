//! Interactive registration wizard.
//!
//! Prompts on the output stream, reads answers line by line and drives the
//! [`RegistrationOrchestrator`]. Wizard errors reach the rider through the
//! UI port, so the loop only decides which page to prompt next.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info};

use rr_app::RegistrationOrchestrator;
use rr_core::registration::code::CODE_LEN;
use rr_core::registration::{FormField, RegistrationError, WizardStep};

const TERMS_OF_USE: &str = "\
Terms of use

By registering you confirm the data above is yours and accurate. Reward
objectives, campaigns and prizes follow the rules published in the app and
may change at any time. Your phone number is used to verify your identity
and to contact you about campaigns.
";

/// How the wizard ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    Abandoned,
}

/// Runs the wizard until registration succeeds or the input ends.
pub async fn run_register<R, W>(
    orchestrator: &RegistrationOrchestrator,
    input: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<RegisterOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut fields_entered = false;

    loop {
        match orchestrator.step().await {
            WizardStep::Phone => {
                fields_entered = false;
                let Some(phone) = prompt(input, out, "Phone number (11 digits):").await? else {
                    return Ok(abandoned());
                };
                if let Err(err) = orchestrator.submit_phone(&phone).await {
                    debug!(error = %err, "phone not accepted");
                }
            }
            WizardStep::Code => {
                let Some(answer) = prompt(
                    input,
                    out,
                    "Verification code (4 digits, 'r' to resend, 'b' to go back):",
                )
                .await?
                else {
                    return Ok(abandoned());
                };
                match answer.as_str() {
                    "r" => {
                        if let Err(err) = orchestrator.resend_code().await {
                            debug!(error = %err, "code not resent");
                        }
                    }
                    "b" => {
                        orchestrator.previous_step().await;
                    }
                    code => {
                        let entries = code_entries(code);
                        if let Err(err) = orchestrator
                            .submit_code(entries.each_ref().map(String::as_str))
                            .await
                        {
                            debug!(error = %err, "code not accepted");
                        }
                    }
                }
            }
            WizardStep::Form => {
                if !fields_entered {
                    if !enter_fields(orchestrator, input, out).await? {
                        return Ok(abandoned());
                    }
                    fields_entered = true;
                }
                let Some(answer) = prompt(
                    input,
                    out,
                    "'t' read the terms, 's' submit, 'e' edit, 'b' go back:",
                )
                .await?
                else {
                    return Ok(abandoned());
                };
                match answer.as_str() {
                    "t" => {
                        orchestrator.view_terms().await;
                    }
                    "s" => match orchestrator.submit_registration().await {
                        Ok(_) => {
                            writeln!(out, "Registration complete. Please sign in.")?;
                            info!("registration wizard finished");
                            return Ok(RegisterOutcome::Registered);
                        }
                        Err(RegistrationError::AlreadySubmitted) => {
                            return Ok(RegisterOutcome::Registered);
                        }
                        Err(err) => debug!(error = %err, "registration not submitted"),
                    },
                    "e" => fields_entered = false,
                    "b" => {
                        orchestrator.previous_step().await;
                    }
                    other => writeln!(out, "Unknown option: {other}")?,
                }
            }
            WizardStep::Terms => {
                write!(out, "\n{TERMS_OF_USE}\n")?;
                let Some(answer) = prompt(input, out, "Do you agree? [y/N]").await? else {
                    return Ok(abandoned());
                };
                if answer.eq_ignore_ascii_case("y") {
                    orchestrator.accept_terms().await;
                } else {
                    orchestrator.previous_step().await;
                }
            }
        }
    }
}

/// Asks for every form field. Returns false if the input ended.
async fn enter_fields<R, W>(
    orchestrator: &RegistrationOrchestrator,
    input: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for field in FormField::REQUIRED
        .into_iter()
        .filter(|f| *f != FormField::Phone)
    {
        loop {
            let current = orchestrator.state().await.form.get(field).to_string();
            let question = if current.is_empty() || field == FormField::Password {
                format!("{}:", capitalize(field.label()))
            } else {
                format!("{} [{current}]:", capitalize(field.label()))
            };
            let Some(answer) = prompt(input, out, &question).await? else {
                return Ok(false);
            };
            if !answer.is_empty() {
                orchestrator.update_field(field, &answer).await;
            }
            if orchestrator.validate_field(field).await.is_none() {
                break;
            }
        }
    }

    let has_bag = orchestrator.state().await.form.has_bag;
    let default = if has_bag { "Y/n" } else { "y/N" };
    let Some(answer) = prompt(input, out, &format!("Do you have a delivery bag? [{default}]")).await?
    else {
        return Ok(false);
    };
    if !answer.is_empty() {
        orchestrator
            .set_has_bag(answer.eq_ignore_ascii_case("y"))
            .await;
    }
    Ok(true)
}

async fn prompt<R, W>(
    input: &mut Lines<R>,
    out: &mut W,
    question: &str,
) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{question} ")?;
    out.flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

/// One slot per typed character. Anything but exactly four characters
/// leaves every slot empty so the submission fails the format check.
fn code_entries(answer: &str) -> [String; CODE_LEN] {
    let chars: Vec<char> = answer.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() != CODE_LEN {
        return Default::default();
    }
    std::array::from_fn(|i| chars[i].to_string())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn abandoned() -> RegisterOutcome {
    info!("registration wizard abandoned");
    RegisterOutcome::Abandoned
}
