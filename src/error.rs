use std::{fmt, path::PathBuf};

use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Account,
    Claim,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Account => write!(f, "memeriksa akun"),
            Stage::Claim => write!(f, "klaim"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File '{}' tidak ditemukan", .0.display())]
    FileMissing(PathBuf),

    #[error("File '{}' kosong", .0.display())]
    FileEmpty(PathBuf),

    #[error("Gagal membaca file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Gagal membaca daftar akun dari {}: {reason}", .path.display())]
    AccountsParse { path: PathBuf, reason: String },

    #[error("File '{}' tidak berisi akun", .0.display())]
    NoAccounts(PathBuf),

    #[error("Header '{name}' tidak valid")]
    InvalidHeader { name: &'static str },

    #[error(
        "GAGAL: Error HTTP {} (Unauthorized/Forbidden). Cookies Anda tidak valid, kedaluwarsa, atau tidak lengkap.",
        .status.as_u16()
    )]
    Auth { status: StatusCode },

    #[error("GAGAL: Error HTTP {} saat {stage}. Pesan Server: {body}", .status.as_u16())]
    Http {
        stage: Stage,
        status: StatusCode,
        body: String,
    },

    #[error("KLAIM DITOLAK (429 Too Many Requests). Cooldown belum selesai. Pesan Server: {body}")]
    CooldownRejected { body: String },

    #[error("Terjadi kesalahan koneksi saat {stage}: {source}")]
    Network {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Respons server tidak valid saat {stage}: {reason}")]
    InvalidResponse { stage: Stage, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
