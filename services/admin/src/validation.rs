//! Input validation utilities

use common::models::{NewUserInput, Role, TaskListInput};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::FieldErrors;

/// Upper bound shared by names, emails and titles, in characters
pub const MAX_LENGTH: usize = 255;

/// A user creation request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

fn required_bounded(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("The {} field is required.", field));
    }

    if value.chars().count() > MAX_LENGTH {
        return Err(format!(
            "The {} field must not be greater than {} characters.",
            field, MAX_LENGTH
        ));
    }

    Ok(())
}

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    required_bounded("name", name)
}

/// Validate an already-normalized email
pub fn validate_email(email: &str) -> Result<(), String> {
    required_bounded("email", email)?;

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("The email field must be a valid email address.".to_string());
    }

    Ok(())
}

/// Resolve a role identifier against the fixed role set
pub fn validate_role(role: &str) -> Result<Role, String> {
    if role.is_empty() {
        return Err("The role field is required.".to_string());
    }

    role.parse::<Role>()
        .map_err(|_| "The selected role is invalid.".to_string())
}

/// Validate a task list title
pub fn validate_title(title: &str) -> Result<(), String> {
    required_bounded("title", title)
}

/// Validate a user creation request, lowercasing the email
pub fn validate_new_user(input: &NewUserInput) -> Result<ValidNewUser, FieldErrors> {
    let name = input.name.trim().to_string();
    let email = normalize_email(&input.email);

    let mut errors = FieldErrors::new();
    errors.check("name", validate_name(&name));
    errors.check("email", validate_email(&email));
    let role = match validate_role(input.role.trim()) {
        Ok(role) => Some(role),
        Err(message) => {
            errors.add("role", message);
            None
        }
    };

    match role {
        Some(role) if errors.is_empty() => Ok(ValidNewUser { name, email, role }),
        _ => Err(errors),
    }
}

/// Validate a task list payload; a blank description is stored as absent
pub fn validate_task_list(input: &TaskListInput) -> Result<TaskListInput, FieldErrors> {
    let title = input.title.trim().to_string();

    let mut errors = FieldErrors::new();
    errors.check("title", validate_title(&title));
    if !errors.is_empty() {
        return Err(errors);
    }

    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(TaskListInput { title, description })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str, role: &str) -> NewUserInput {
        NewUserInput {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_email_is_lowercased() {
        let valid = validate_new_user(&new_user("Ann", " ANN@X.COM ", "staff")).unwrap();
        assert_eq!(valid.email, "ann@x.com");
        assert_eq!(valid.role, Role::Staff);
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "ann", "ann@", "@x.com", "ann@x", "ann x@x.com"] {
            assert!(validate_email(email).is_err(), "{email} should be rejected");
        }
        assert!(validate_email("ann.lee+tag@mail.example.org").is_ok());
    }

    #[test]
    fn test_length_bounds_count_characters() {
        let at_limit = "é".repeat(MAX_LENGTH);
        let over_limit = "a".repeat(MAX_LENGTH + 1);
        assert!(validate_name(&at_limit).is_ok());
        assert!(validate_name(&over_limit).is_err());
        assert!(validate_title(&over_limit).is_err());
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let errors = validate_new_user(&new_user("", "nope", "manager")).unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert_eq!(
            errors.get("role"),
            Some(&["The selected role is invalid.".to_string()][..])
        );
    }

    #[test]
    fn test_missing_role() {
        let errors = validate_new_user(&new_user("Ann", "ann@x.com", "")).unwrap_err();
        assert_eq!(errors.get("role").map(<[String]>::len), Some(1));
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_task_list_title_required() {
        let input = TaskListInput {
            title: "   ".to_string(),
            description: None,
        };
        let errors = validate_task_list(&input).unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some(&["The title field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_task_list_blank_description_becomes_none() {
        let input = TaskListInput {
            title: " Groceries ".to_string(),
            description: Some("  ".to_string()),
        };
        let valid = validate_task_list(&input).unwrap();
        assert_eq!(valid.title, "Groceries");
        assert_eq!(valid.description, None);
    }
}
