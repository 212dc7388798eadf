use std::path::PathBuf;

const DB_FILE_NAME: &str = "sshportal.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
}

impl ServerConfig {
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}
