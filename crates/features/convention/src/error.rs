use std::borrow::Cow;

/// Errors raised while configuring or running the convention engine.
///
/// All of them are programming or configuration faults; the engine performs no I/O,
/// so nothing here is transient or worth retrying.
#[autoapi_derive::autoapi_error]
pub enum ConventionError {
    /// The configuration is incomplete or contradictory. Fatal at initialization.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An identifier or length argument violates a precondition.
    #[error("Invalid input{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A configured verb is not a known HTTP method.
    #[error("Unknown HTTP method{}: {source}", format_context(.context))]
    HttpMethod { source: strum::ParseError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues.
    #[error("Internal convention error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConventionError {
    pub(crate) fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput { message: message.into(), context: None }
    }

    pub(crate) fn invalid_configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfiguration { message: message.into(), context: None }
    }
}
