//! Registration form record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Text fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Phone,
    TaxIdIndividual,
    TaxIdBusiness,
    FirstName,
    LastName,
    Email,
    BirthDate,
    Password,
    City,
}

impl FormField {
    /// Every field that must be valid before the form can be submitted.
    pub const REQUIRED: [FormField; 9] = [
        FormField::Phone,
        FormField::TaxIdBusiness,
        FormField::TaxIdIndividual,
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::BirthDate,
        FormField::Password,
        FormField::City,
    ];

    /// Human readable label used in warnings.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Phone => "phone number",
            FormField::TaxIdIndividual => "CPF",
            FormField::TaxIdBusiness => "CNPJ",
            FormField::FirstName => "first name",
            FormField::LastName => "last name",
            FormField::Email => "e-mail",
            FormField::BirthDate => "birth date",
            FormField::Password => "password",
            FormField::City => "city",
        }
    }

    /// Whether a failed check wipes the stored value. The phone number is
    /// kept so the rider can fix a single digit.
    pub fn resets_on_invalid(&self) -> bool {
        !matches!(self, FormField::Phone)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownFormField(pub String);

impl FromStr for FormField {
    type Err = UnknownFormField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" | "telefone" => Ok(FormField::Phone),
            "cpf" => Ok(FormField::TaxIdIndividual),
            "cnpj" => Ok(FormField::TaxIdBusiness),
            "first_name" | "nome" => Ok(FormField::FirstName),
            "last_name" | "sobrenome" => Ok(FormField::LastName),
            "email" => Ok(FormField::Email),
            "birth_date" | "data_de_nascimento" => Ok(FormField::BirthDate),
            "password" | "senha" => Ok(FormField::Password),
            "city" | "cidade" => Ok(FormField::City),
            other => Err(UnknownFormField(other.to_string())),
        }
    }
}

/// Data collected by the registration wizard.
///
/// Lives only in memory for the duration of the flow.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub phone: String,
    pub tax_id_individual: String,
    pub tax_id_business: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: String,
    pub password: String,
    pub city: String,
    pub has_bag: bool,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("phone", &self.phone)
            .field("tax_id_individual", &self.tax_id_individual)
            .field("tax_id_business", &self.tax_id_business)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .field("password", &"[REDACTED]")
            .field("city", &self.city)
            .field("has_bag", &self.has_bag)
            .finish()
    }
}

impl RegistrationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Phone => &self.phone,
            FormField::TaxIdIndividual => &self.tax_id_individual,
            FormField::TaxIdBusiness => &self.tax_id_business,
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::BirthDate => &self.birth_date,
            FormField::Password => &self.password,
            FormField::City => &self.city,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Phone => &mut self.phone,
            FormField::TaxIdIndividual => &mut self.tax_id_individual,
            FormField::TaxIdBusiness => &mut self.tax_id_business,
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::BirthDate => &mut self.birth_date,
            FormField::Password => &mut self.password,
            FormField::City => &mut self.city,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn clear(&mut self, field: FormField) {
        self.slot_mut(field).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_round_through_the_same_slot() {
        let mut form = RegistrationForm::default();
        for field in FormField::REQUIRED {
            form.set(field, "x");
            assert_eq!(form.get(field), "x");
            form.clear(field);
            assert_eq!(form.get(field), "");
        }
    }

    #[test]
    fn debug_output_redacts_password() {
        let form = RegistrationForm {
            password: "Abcdef1!".into(),
            ..Default::default()
        };
        let printed = format!("{form:?}");
        assert!(!printed.contains("Abcdef1!"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn form_field_parses_wire_and_english_names() {
        assert_eq!("CPF".parse::<FormField>(), Ok(FormField::TaxIdIndividual));
        assert_eq!("senha".parse::<FormField>(), Ok(FormField::Password));
        assert_eq!("birth_date".parse::<FormField>(), Ok(FormField::BirthDate));
        assert!("shoe_size".parse::<FormField>().is_err());
    }
}
