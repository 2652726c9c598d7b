use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::Url;

use super::ClientError;

/// Indicador de carga compartido por los botones de envío
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    loading: Arc<AtomicBool>,
}

/// Mientras exista, el guard está ocupado
#[derive(Debug)]
pub struct SubmitTicket {
    loading: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn try_begin(&self) -> Result<SubmitTicket, ClientError> {
        if self.loading.swap(true, Ordering::SeqCst) {
            return Err(ClientError::Busy);
        }
        Ok(SubmitTicket {
            loading: self.loading.clone(),
        })
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.loading.store(false, Ordering::SeqCst);
    }
}

/// Confirmación del usuario antes de una acción destructiva
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub fn delete_prompt(brand: &str, sub_brand: &str) -> String {
    format!(
        "¿Estás seguro de que deseas eliminar el registro de {} {}?",
        brand, sub_brand
    )
}

/// URL de la página con el término de búsqueda en `q`; en blanco lo quita
pub fn dashboard_url(base: &Url, q: Option<&str>) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "q")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let term = q.map(str::trim).filter(|t| !t.is_empty());

    let mut url = base.clone();
    url.set_query(None);
    if !kept.is_empty() || term.is_some() {
        let mut pairs = url.query_pairs_mut();
        pairs.extend_pairs(kept);
        if let Some(term) = term {
            pairs.append_pair("q", term);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_guard_rejects_second_submit() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin().unwrap();
        assert!(guard.is_loading());
        assert!(matches!(guard.try_begin(), Err(ClientError::Busy)));

        drop(ticket);
        assert!(!guard.is_loading());
        assert!(guard.try_begin().is_ok());
    }

    #[test]
    fn test_closure_confirm_sees_prompt() {
        let seen = RefCell::new(String::new());
        let confirmer = |prompt: &str| {
            *seen.borrow_mut() = prompt.to_string();
            false
        };
        assert!(!confirmer.confirm(&delete_prompt("Renault", "Kwid")));
        assert_eq!(
            *seen.borrow(),
            "¿Estás seguro de que deseas eliminar el registro de Renault Kwid?"
        );
    }

    #[test]
    fn test_dashboard_url_reflects_query() {
        let base = Url::parse("http://localhost:3000/dashboard?q=old&view=cards").unwrap();

        let url = dashboard_url(&base, Some(" Kwid "));
        assert_eq!(url.as_str(), "http://localhost:3000/dashboard?view=cards&q=Kwid");

        let url = dashboard_url(&base, Some("   "));
        assert_eq!(url.as_str(), "http://localhost:3000/dashboard?view=cards");

        let plain = Url::parse("http://localhost:3000/dashboard").unwrap();
        assert_eq!(dashboard_url(&plain, None).as_str(), "http://localhost:3000/dashboard");
        assert_eq!(
            dashboard_url(&plain, Some("Niño Ñ")).as_str(),
            "http://localhost:3000/dashboard?q=Ni%C3%B1o+%C3%91"
        );
    }
}
