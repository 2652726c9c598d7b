//! Búsqueda con debounce
//!
//! Cada tecla publica el término en un canal `watch`; el lector solo
//! entrega un valor cuando el término lleva `quiet` sin cambiar. Gana
//! siempre el último valor.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Lado que escribe: el campo de búsqueda
#[derive(Debug)]
pub struct SearchDebouncer {
    tx: watch::Sender<String>,
}

/// Lado que lee: quien lanza la consulta
#[derive(Debug)]
pub struct SettledSearch {
    rx: watch::Receiver<String>,
    quiet: Duration,
}

pub fn search_channel(quiet: Duration) -> (SearchDebouncer, SettledSearch) {
    let (tx, rx) = watch::channel(String::new());
    (SearchDebouncer { tx }, SettledSearch { rx, quiet })
}

impl SearchDebouncer {
    pub fn push(&self, term: impl Into<String>) {
        self.tx.send_replace(term.into());
    }
}

impl SettledSearch {
    /// Siguiente término estable, sin espacios laterales. Una cadena vacía
    /// significa "quitar la búsqueda". `None` cuando el escritor se cerró.
    pub async fn next(&mut self) -> Option<String> {
        self.rx.changed().await.ok()?;

        loop {
            match timeout(self.quiet, self.rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) | Err(_) => break,
            }
        }

        let term = self.rx.borrow_and_update().trim().to_string();
        Some(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_emits_latest_only() {
        let (debouncer, mut settled) = search_channel(DEFAULT_QUIET_PERIOD);

        let typing = async {
            debouncer.push("ren");
            sleep(Duration::from_millis(100)).await;
            debouncer.push("renau");
            sleep(Duration::from_millis(100)).await;
            debouncer.push("  Renault ");
        };

        let (_, term) = tokio::join!(typing, settled.next());
        assert_eq!(term.as_deref(), Some("Renault"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_longer_than_quiet_settles_each_term() {
        let (debouncer, mut settled) = search_channel(DEFAULT_QUIET_PERIOD);

        debouncer.push("Kwid");
        assert_eq!(settled.next().await.as_deref(), Some("Kwid"));

        debouncer.push("   ");
        assert_eq!(settled.next().await.as_deref(), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_writer_ends_stream() {
        let (debouncer, mut settled) = search_channel(DEFAULT_QUIET_PERIOD);
        drop(debouncer);
        assert_eq!(settled.next().await, None);
    }
}
