use std::{fmt, time::Duration};

use tracing::Instrument;

use crate::{
    api::{AccountStatus, ClaimResult, GemsApi},
    config::Config,
    credentials::Credential,
    error::Result,
    utils::{format_optional_timestamp, now_millis},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl WaitTime {
    pub fn from_millis(millis: i64) -> Self {
        let total_seconds = millis.max(0) / 1000;

        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
        }
    }
}

impl fmt::Display for WaitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} jam, {} menit, {} detik",
            self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    NotReady {
        status: AccountStatus,
        wait: WaitTime,
    },
    Claimed {
        previous_gems: u64,
        result: ClaimResult,
    },
}

impl fmt::Display for ClaimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimOutcome::NotReady { status, wait } => write!(
                f,
                "Gems Saat Ini: {}. TIDAK SIAP KLAIM. Waktu tunggu tersisa: {wait}.",
                status.gems
            ),
            ClaimOutcome::Claimed {
                previous_gems,
                result,
            } => write!(
                f,
                "KLAIM BERHASIL! Gems Baru Anda: {} (sebelumnya {previous_gems}). \
                 Waktu Klaim Berikutnya Diperbarui ke: {}",
                result.gems,
                format_optional_timestamp(result.next_free_gems_at)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub claimed: usize,
    pub not_ready: usize,
    pub failed: usize,
}

pub async fn check_and_claim(
    api: &GemsApi,
    credential: &Credential,
    now: i64,
) -> Result<ClaimOutcome> {
    let headers = api.auth_headers(credential)?;

    tracing::info!("Memulai pengecekan status...");
    let status = api.account_status(&headers).await?;

    tracing::info!(
        "Klaim Berikutnya Dijadwalkan: {}",
        format_optional_timestamp(status.next_free_gems_at)
    );

    if let Some(next) = status.next_free_gems_at.filter(|next| *next > now) {
        let wait = WaitTime::from_millis(next - now);
        return Ok(ClaimOutcome::NotReady { status, wait });
    }

    tracing::info!(
        "SIAP KLAIM. Gems Saat Ini: {}. Mencoba mengirim permintaan klaim...",
        status.gems
    );
    let result = api.claim_free_gems(&headers).await?;

    Ok(ClaimOutcome::Claimed {
        previous_gems: status.gems,
        result,
    })
}

pub async fn claim_for_all(
    config: &Config,
    credentials: Vec<Credential>,
) -> eyre::Result<RunSummary> {
    let api = GemsApi::new(config)?;
    let delay = Duration::from_millis(config.account_delay);

    let mut summary = RunSummary {
        total: credentials.len(),
        ..RunSummary::default()
    };

    for (index, credential) in credentials.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(delay).await;
        }

        let span = tracing::info_span!(
            "account",
            name = credential.label(),
            n = index + 1,
            of = summary.total
        );

        match check_and_claim(&api, credential, now_millis())
            .instrument(span.clone())
            .await
        {
            Ok(outcome) => {
                span.in_scope(|| tracing::info!("{outcome}"));
                match outcome {
                    ClaimOutcome::Claimed { .. } => summary.claimed += 1,
                    ClaimOutcome::NotReady { .. } => summary.not_ready += 1,
                }
            }
            Err(e) => {
                span.in_scope(|| tracing::error!("{e}"));
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        total = summary.total,
        claimed = summary.claimed,
        not_ready = summary.not_ready,
        failed = summary.failed,
        "Selesai memproses {} akun",
        summary.total
    );

    Ok(summary)
}
