//! HTTP registration gateway.
//!
//! Talks to the backend's `/auth` endpoints. Field names on the wire are the
//! backend's Portuguese names.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rr_core::ports::{
    HttpClientPort, HttpError, HttpRequest, HttpResponse, RegistrationGatewayPort, RemoteError,
};
use rr_core::registration::code::CODE_LEN;
use rr_core::registration::validation::digits_only;
use rr_core::registration::RegistrationForm;

use super::endpoint;

const SEND_NUMBER_PATH: &str = "auth/sendNumber";
const VALIDATE_CODE_PATH: &str = "auth/validateCode";
const REGISTER_PATH: &str = "auth/register";

#[derive(Debug, Serialize)]
struct PhoneChallengeRequest<'a> {
    telefone: &'a str,
}

#[derive(Debug, Serialize)]
struct CodeValidationRequest<'a> {
    telefone: &'a str,
    codigo: u32,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    #[serde(rename = "CNPJ")]
    cnpj: &'a str,
    #[serde(rename = "CPF")]
    cpf: &'a str,
    nome: &'a str,
    sobrenome: &'a str,
    email: &'a str,
    data_de_nascimento: &'a str,
    senha: &'a str,
    cidade: &'a str,
    telefone: String,
    mochila: bool,
}

impl<'a> From<&'a RegistrationForm> for RegisterRequest<'a> {
    fn from(form: &'a RegistrationForm) -> Self {
        Self {
            cnpj: &form.tax_id_business,
            cpf: &form.tax_id_individual,
            nome: &form.first_name,
            sobrenome: &form.last_name,
            email: &form.email,
            data_de_nascimento: &form.birth_date,
            senha: &form.password,
            cidade: &form.city,
            telefone: digits_only(&form.phone),
            mochila: form.has_bag,
        }
    }
}

/// The issued code comes back as a bare JSON number or string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IssuedCode {
    Number(u64),
    Text(String),
}

/// Reads the verification code out of a `sendNumber` response.
///
/// Numeric codes are left-padded back to four digits. A body that is not
/// JSON is accepted when it is plain digits.
fn parse_issued_code(response: &HttpResponse) -> Result<String, RemoteError> {
    let code = match response.json::<IssuedCode>() {
        Ok(IssuedCode::Number(n)) => format!("{n:0width$}", width = CODE_LEN),
        Ok(IssuedCode::Text(text)) => text.trim().to_string(),
        Err(err) => {
            let text = response.text().trim().to_string();
            if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                return Err(err);
            }
            text
        }
    };
    if code.is_empty() {
        return Err(RemoteError::Decode("empty verification code".to_string()));
    }
    Ok(code)
}

/// [`RegistrationGatewayPort`] over the backend's JSON API.
pub struct HttpRegistrationGateway {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
}

impl HttpRegistrationGateway {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpResponse, RemoteError> {
        let body = serde_json::to_value(body)
            .map_err(|e| RemoteError::from(HttpError::InvalidRequest(e.to_string())))?;
        let url = endpoint(&self.base_url, path);
        debug!(url = %url, "posting registration request");
        Ok(self.http.request(HttpRequest::post_json(url, body)).await?)
    }
}

#[async_trait]
impl RegistrationGatewayPort for HttpRegistrationGateway {
    async fn send_phone_challenge(&self, phone: &str) -> Result<String, RemoteError> {
        let response = self
            .post(SEND_NUMBER_PATH, &PhoneChallengeRequest { telefone: phone })
            .await?;
        if !response.is_success() {
            warn!(status = response.status, "phone challenge rejected");
            return Err(RemoteError::ChallengeRejected {
                status: response.status,
            });
        }
        let code = parse_issued_code(&response)?;
        info!("verification code sent");
        Ok(code)
    }

    async fn validate_code(&self, phone: &str, code: &str) -> Result<(), RemoteError> {
        let codigo = code.parse::<u32>().map_err(|_| {
            RemoteError::from(HttpError::InvalidRequest(format!(
                "verification code is not numeric: {code}"
            )))
        })?;
        let response = self
            .post(
                VALIDATE_CODE_PATH,
                &CodeValidationRequest {
                    telefone: phone,
                    codigo,
                },
            )
            .await?;
        if !response.is_success() {
            warn!(status = response.status, "code validation rejected");
            return Err(RemoteError::ValidationRejected {
                status: response.status,
            });
        }
        Ok(())
    }

    async fn register(&self, form: &RegistrationForm) -> Result<(), RemoteError> {
        let response = self
            .post(REGISTER_PATH, &RegisterRequest::from(form))
            .await?;
        if !response.is_success() {
            warn!(status = response.status, "registration rejected");
            return Err(RemoteError::RegistrationRejected {
                status: response.status,
            });
        }
        Ok(())
    }
}
