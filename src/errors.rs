use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro no banco de dados: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Dados inválidos: {0}")]
    Constraint(String),
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
