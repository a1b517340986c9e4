use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("key component '{component}' is empty")]
    EmptyKeyComponent { component: &'static str },

    #[error("key component '{component}' contains the separator '{separator}': {value:?}")]
    SeparatorInKeyComponent {
        component: &'static str,
        separator: char,
        value: String,
    },
}
