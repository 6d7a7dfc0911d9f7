//! Field validators for the registration form.
//!
//! Every validator is a pure function over the raw input. Blank input is
//! reported as [`ValidationError::Required`]; anything that fails the field's
//! own rule is [`ValidationError::Format`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::error::ValidationError;
use super::form::{FormField, RegistrationForm};

pub const PHONE_DIGITS: usize = 11;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$").expect("static email pattern")
});

static BIRTH_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("static date pattern"));

/// Strips everything that is not an ASCII digit.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validates a phone number and returns its digits.
pub fn validate_phone(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required {
            field: FormField::Phone,
        });
    }
    let digits = digits_only(raw);
    if digits.len() != PHONE_DIGITS {
        return Err(ValidationError::Format {
            field: FormField::Phone,
        });
    }
    Ok(digits)
}

/// Mask characters accepted around CPF/CNPJ digits.
fn strip_tax_id_mask(raw: &str) -> Option<Vec<u32>> {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/'))
        .map(|c| c.to_digit(10))
        .collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (len + 1 - i as u32))
        .sum();
    let rest = (sum * 10) % 11;
    if rest == 10 {
        0
    } else {
        rest
    }
}

/// CPF (individual taxpayer id) checksum.
pub fn is_valid_cpf(raw: &str) -> bool {
    let Some(digits) = strip_tax_id_mask(raw) else {
        return false;
    };
    if digits.len() != 11 || all_same(&digits) || digits == [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 9] {
        return false;
    }
    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

fn cnpj_check_digit(digits: &[u32]) -> u32 {
    // Weights run 2..=9 from the rightmost digit, wrapping around.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| d * (i as u32 % 8 + 2))
        .sum();
    let rest = sum % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}

/// CNPJ (business taxpayer id) checksum.
pub fn is_valid_cnpj(raw: &str) -> bool {
    let Some(digits) = strip_tax_id_mask(raw) else {
        return false;
    };
    if digits.len() != 14 || all_same(&digits) {
        return false;
    }
    cnpj_check_digit(&digits[..12]) == digits[12] && cnpj_check_digit(&digits[..13]) == digits[13]
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw.trim())
}

/// `DD/MM/YYYY` naming a real calendar date.
pub fn is_valid_birth_date(raw: &str) -> bool {
    let raw = raw.trim();
    BIRTH_DATE_SHAPE.is_match(raw) && NaiveDate::parse_from_str(raw, "%d/%m/%Y").is_ok()
}

pub fn is_strong_password(raw: &str) -> bool {
    raw.chars().count() >= MIN_PASSWORD_LEN
        && raw.chars().any(|c| c.is_ascii_uppercase())
        && raw.chars().any(|c| c.is_ascii_lowercase())
        && raw.chars().any(|c| c.is_ascii_digit())
        && raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Checks a single field value against its rule.
pub fn validate_field(field: FormField, value: &str) -> Result<(), ValidationError> {
    if field == FormField::Phone {
        return validate_phone(value).map(|_| ());
    }
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    let valid = match field {
        FormField::TaxIdIndividual => is_valid_cpf(value),
        FormField::TaxIdBusiness => is_valid_cnpj(value),
        FormField::Email => is_valid_email(value),
        FormField::BirthDate => is_valid_birth_date(value),
        FormField::Password => is_strong_password(value),
        FormField::FirstName | FormField::LastName | FormField::City | FormField::Phone => true,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::Format { field })
    }
}

/// First field that keeps the form from being submitted, if any.
pub fn first_invalid_field(form: &RegistrationForm) -> Option<FormField> {
    FormField::REQUIRED
        .into_iter()
        .find(|field| validate_field(*field, form.get(*field)).is_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_exactly_eleven_digits() {
        assert_eq!(validate_phone("(11) 98765-4321"), Ok("11987654321".into()));
        assert_eq!(
            validate_phone("   "),
            Err(ValidationError::Required {
                field: FormField::Phone
            })
        );
        assert_eq!(
            validate_phone("1198765432"),
            Err(ValidationError::Format {
                field: FormField::Phone
            })
        );
        assert!(validate_phone("119876543210").is_err());
    }

    #[test]
    fn cpf_checksum() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("52998224725"));
        assert!(!is_valid_cpf("529.982.247-26"));
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("123.456.789-09"));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529x98224725"));
    }

    #[test]
    fn cnpj_checksum() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
        assert!(!is_valid_cnpj("00.000.000/0000-00"));
        assert!(!is_valid_cnpj("1122233300018"));
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("rider@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.br"));
        assert!(!is_valid_email("rider@example"));
        assert!(!is_valid_email("rider example.com"));
        assert!(!is_valid_email("rider@example.company"));
    }

    #[test]
    fn birth_date_must_be_a_calendar_date() {
        assert!(is_valid_birth_date("01/01/2000"));
        assert!(is_valid_birth_date("29/02/2024"));
        assert!(!is_valid_birth_date("31/02/2024"));
        assert!(!is_valid_birth_date("29/02/2023"));
        assert!(!is_valid_birth_date("1/1/2000"));
        assert!(!is_valid_birth_date("2000-01-01"));
    }

    #[test]
    fn password_strength_rules() {
        assert!(!is_strong_password("Abc123!"));
        assert!(is_strong_password("Abcdef1!"));
        assert!(!is_strong_password("abcdef1!"));
        assert!(!is_strong_password("ABCDEF1!"));
        assert!(!is_strong_password("Abcdefg!"));
        assert!(!is_strong_password("Abcdefg1"));
        assert!(!is_strong_password("Abcdef1?"));
    }

    #[test]
    fn blank_values_are_required_errors() {
        assert_eq!(
            validate_field(FormField::City, "  "),
            Err(ValidationError::Required {
                field: FormField::City
            })
        );
        assert_eq!(validate_field(FormField::City, "Recife"), Ok(()));
        assert_eq!(
            validate_field(FormField::Email, "nope"),
            Err(ValidationError::Format {
                field: FormField::Email
            })
        );
    }

    #[test]
    fn first_invalid_field_walks_required_fields_in_order() {
        let mut form = RegistrationForm::default();
        assert_eq!(first_invalid_field(&form), Some(FormField::Phone));
        form.phone = "11987654321".into();
        assert_eq!(first_invalid_field(&form), Some(FormField::TaxIdBusiness));
    }
}
