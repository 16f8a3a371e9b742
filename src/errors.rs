use std::fmt;

#[derive(Debug, Clone)]
pub enum MukaError {
    Validation(String),
    InvalidQuestionId(String),
    LinkNotFound(String),
    LinkExpired(String),
    LinkAlreadyUsed(String),
    HashCollision(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
}

impl MukaError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            MukaError::Validation(_) => "E001",
            MukaError::InvalidQuestionId(_) => "E002",
            MukaError::LinkNotFound(_) => "E003",
            MukaError::LinkExpired(_) => "E004",
            MukaError::LinkAlreadyUsed(_) => "E005",
            MukaError::HashCollision(_) => "E006",
            MukaError::DatabaseConfig(_) => "E007",
            MukaError::DatabaseConnection(_) => "E008",
            MukaError::DatabaseOperation(_) => "E009",
            MukaError::FileOperation(_) => "E010",
            MukaError::Serialization(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            MukaError::Validation(_) => "Validation Error",
            MukaError::InvalidQuestionId(_) => "Invalid Question Reference",
            MukaError::LinkNotFound(_) => "Link Not Found",
            MukaError::LinkExpired(_) => "Link Expired",
            MukaError::LinkAlreadyUsed(_) => "Link Already Used",
            MukaError::HashCollision(_) => "Hash Collision",
            MukaError::DatabaseConfig(_) => "Database Configuration Error",
            MukaError::DatabaseConnection(_) => "Database Connection Error",
            MukaError::DatabaseOperation(_) => "Database Operation Error",
            MukaError::FileOperation(_) => "File Operation Error",
            MukaError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            MukaError::Validation(msg)
            | MukaError::InvalidQuestionId(msg)
            | MukaError::LinkNotFound(msg)
            | MukaError::LinkExpired(msg)
            | MukaError::LinkAlreadyUsed(msg)
            | MukaError::HashCollision(msg)
            | MukaError::DatabaseConfig(msg)
            | MukaError::DatabaseConnection(msg)
            | MukaError::DatabaseOperation(msg)
            | MukaError::FileOperation(msg)
            | MukaError::Serialization(msg) => msg,
        }
    }

    /// Client faults: bad input, dangling references and terminal link states.
    ///
    /// Everything else is an infrastructure failure whose detail must stay
    /// server-side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MukaError::Validation(_)
                | MukaError::InvalidQuestionId(_)
                | MukaError::LinkNotFound(_)
                | MukaError::LinkExpired(_)
                | MukaError::LinkAlreadyUsed(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for MukaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MukaError {}

// 便捷的构造函数
impl MukaError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        MukaError::Validation(msg.into())
    }

    pub fn invalid_question_id<T: Into<String>>(msg: T) -> Self {
        MukaError::InvalidQuestionId(msg.into())
    }

    pub fn link_not_found<T: Into<String>>(msg: T) -> Self {
        MukaError::LinkNotFound(msg.into())
    }

    pub fn link_expired<T: Into<String>>(msg: T) -> Self {
        MukaError::LinkExpired(msg.into())
    }

    pub fn link_already_used<T: Into<String>>(msg: T) -> Self {
        MukaError::LinkAlreadyUsed(msg.into())
    }

    pub fn hash_collision<T: Into<String>>(msg: T) -> Self {
        MukaError::HashCollision(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        MukaError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        MukaError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        MukaError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        MukaError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        MukaError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for MukaError {
    fn from(err: sea_orm::DbErr) -> Self {
        MukaError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for MukaError {
    fn from(err: std::io::Error) -> Self {
        MukaError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for MukaError {
    fn from(err: serde_json::Error) -> Self {
        MukaError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MukaError>;
