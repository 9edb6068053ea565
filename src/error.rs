//! Unified application error model and mapping helpers.
//! This module provides the common error enum used across the backend client,
//! the credential store seam and the console, along with the mapper that turns
//! an error into the message a user actually sees.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    Auth { code: String, message: String },
    Store { code: String, message: String },
    Http { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Store { code, .. }
            | AppError::Http { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Store { message, .. }
            | AppError::Http { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user_input<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn store<S: Into<String>>(code: S, msg: S) -> Self { AppError::Store { code: code.into(), message: msg.into() } }
    pub fn http<S: Into<String>>(code: S, msg: S) -> Self { AppError::Http { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Map to the line shown to the user. Backend-provided messages win;
    /// otherwise each class falls back to its generic product wording.
    pub fn user_message(&self) -> String {
        let carried = self.message();
        if !carried.is_empty() {
            return carried.to_string();
        }
        match self {
            AppError::UserInput { .. } => "Dados inválidos. Verifique os campos informados.".to_string(),
            AppError::Auth { .. } => "Erro ao tentar fazer login. Tente novamente.".to_string(),
            AppError::Store { .. } => "Não foi possível acessar as credenciais salvas.".to_string(),
            AppError::Http { code, .. } if code == "no_response" => {
                "Sem resposta do servidor. Verifique sua conexão.".to_string()
            }
            AppError::Http { .. } => "Ocorreu um erro no servidor".to_string(),
            AppError::Internal { .. } => "Erro na requisição. Tente novamente.".to_string(),
        }
    }

    /// True when the backend explicitly rejected the caller's credentials
    /// (the collaborating layer reacts to this by running the logout transition).
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, AppError::Auth { .. })
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Default mapping: anyhow only surfaces here from the store boundary
        AppError::Store { code: "store_io".into(), message: err.to_string() }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // Status-bearing failures are classified at the call site; what reaches
        // this mapping is the transport layer (connect/timeout/body decode).
        if err.is_connect() || err.is_timeout() {
            AppError::Http { code: "no_response".into(), message: String::new() }
        } else {
            AppError::Http { code: "request_failed".into(), message: String::new() }
        }
    }
}
