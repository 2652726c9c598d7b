//! Reloj local del panel
//!
//! El listado por defecto muestra los registros del día calendario local.
//! El desfase horario se fija por configuración, así el límite de medianoche
//! no depende de la zona del servidor.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};

/// Reloj con desfase UTC fijo
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    offset: FixedOffset,
}

impl LocalClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    pub fn current_year(&self) -> i32 {
        self.now().with_timezone(&self.offset).year()
    }

    /// Medianoche local del día actual, expresada en UTC
    pub fn start_of_today(&self) -> DateTime<Utc> {
        start_of_day(self.now(), self.offset)
    }

    /// Hora local "HH:mm" de un instante
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset).format("%H:%M").to_string()
    }
}

/// Medianoche local del día que contiene `now`
pub fn start_of_day(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    local
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| offset.from_local_datetime(&midnight).single())
        .map(|midnight| midnight.with_timezone(&Utc))
        // Un desfase fijo no tiene huecos ni ambigüedades
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_start_of_day_utc() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            start_of_day(at("2026-10-16T15:30:00Z"), offset),
            at("2026-10-16T00:00:00Z")
        );
    }

    #[test]
    fn test_start_of_day_west_of_utc() {
        // 03:00 UTC es todavía el día anterior en UTC-6
        let offset = FixedOffset::west_opt(6 * 3600).unwrap();
        assert_eq!(
            start_of_day(at("2026-10-16T03:00:00Z"), offset),
            at("2026-10-15T06:00:00Z")
        );
    }

    #[test]
    fn test_format_time_uses_offset() {
        let clock = LocalClock::new(FixedOffset::west_opt(6 * 3600).unwrap());
        assert_eq!(clock.format_time(at("2026-10-16T15:05:00Z")), "09:05");
    }
}
