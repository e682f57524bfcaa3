//! Contact form fields and validation rules.

use thiserror::Error;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 5_000;
/// Simulated send latency; there is no real transport behind the form.
pub const SIMULATED_SUBMIT_MS: u32 = 2_000;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be no more than {max} characters long")]
    TooLong { field: &'static str, max: usize },
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let errors = FormErrors {
            name: validate_field(Field::Name, &self.name).err(),
            email: validate_field(Field::Email, &self.email).err(),
            message: validate_field(Field::Message, &self.message).err(),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub message: Option<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Email => self.email.as_ref(),
            Field::Message => self.message.as_ref(),
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Email => self.email = None,
            Field::Message => self.message = None,
        }
    }
}

pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Name => {
            required(value, "Name")?;
            min_length(value, NAME_MIN_CHARS, "Name")
        }
        Field::Email => validate_email(value),
        Field::Message => {
            required(value, "Message")?;
            min_length(value, MESSAGE_MIN_CHARS, "Message")?;
            max_length(value, MESSAGE_MAX_CHARS, "Message")
        }
    }
}

pub fn required(value: &str, field: &'static str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required(field));
    }
    Ok(())
}

pub fn min_length(value: &str, min: usize, field: &'static str) -> Result<(), FieldError> {
    if value.trim().chars().count() < min {
        return Err(FieldError::TooShort { field, min });
    }
    Ok(())
}

pub fn max_length(value: &str, max: usize, field: &'static str) -> Result<(), FieldError> {
    if value.trim().chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with text on both sides.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required("Email"));
    }

    if value.chars().any(char::is_whitespace) {
        return Err(FieldError::InvalidEmail);
    }

    let Some((local, domain)) = value.split_once('@') else {
        return Err(FieldError::InvalidEmail);
    };

    if local.is_empty() || domain.contains('@') {
        return Err(FieldError::InvalidEmail);
    }

    let has_dotted_domain = domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len());

    if has_dotted_domain {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert_eq!(form("Ada", "ada@example.com", "Hello there, friend").validate(), Ok(()));
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ContactForm::default().validate().expect_err("empty form is invalid");

        assert_eq!(errors.name, Some(FieldError::Required("Name")));
        assert_eq!(errors.email, Some(FieldError::Required("Email")));
        assert_eq!(errors.message, Some(FieldError::Required("Message")));
    }

    #[test]
    fn messages_match_the_form_copy() {
        assert_eq!(
            FieldError::TooShort { field: "Name", min: 2 }.to_string(),
            "Name must be at least 2 characters long"
        );
        assert_eq!(FieldError::Required("Email").to_string(), "Email is required");
        assert_eq!(
            FieldError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn lengths_are_measured_after_trimming() {
        assert_eq!(
            validate_field(Field::Name, "  a  "),
            Err(FieldError::TooShort { field: "Name", min: 2 })
        );
        assert_eq!(validate_field(Field::Name, "   "), Err(FieldError::Required("Name")));
        assert!(validate_field(Field::Message, "   ten chars!  ").is_ok());
    }

    #[test]
    fn overlong_message_is_rejected() {
        let message = "x".repeat(MESSAGE_MAX_CHARS + 1);
        assert_eq!(
            validate_field(Field::Message, &message),
            Err(FieldError::TooLong { field: "Message", max: MESSAGE_MAX_CHARS })
        );
    }

    #[test]
    fn email_shapes() {
        for valid in ["a@b.co", "first.last@sub.example.org", "x+tag@d.io"] {
            assert_eq!(validate_email(valid), Ok(()), "{valid}");
        }

        for invalid in ["plain", "@b.co", "a@b", "a@.co", "a@b.", "a b@c.de", "a@b@c.de"] {
            assert_eq!(validate_email(invalid), Err(FieldError::InvalidEmail), "{invalid}");
        }
    }

    #[test]
    fn clearing_one_error_keeps_the_others() {
        let mut errors = ContactForm::default().validate().expect_err("invalid");
        errors.clear(Field::Email);

        assert!(errors.get(Field::Email).is_none());
        assert!(errors.get(Field::Name).is_some());
        assert!(!errors.is_empty());
    }
}
