//! Drosselung der Aufweck-Runden während eines Drags.

/// Feuert höchstens einmal pro Zeitfenster; erst nach Ablauf des vollen
/// Fensters (strikt größer) wieder.
///
/// Die Zeit kommt von außen (Frame-Uhr), damit Tests eine feste Uhr
/// einspeisen können.
#[derive(Debug, Clone, PartialEq)]
pub struct WakeThrottle {
    window: f32,
    last_fired: Option<f32>,
}

impl WakeThrottle {
    /// Erstellt eine Drosselung mit Fensterbreite `window` in Sekunden.
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(0.0),
            last_fired: None,
        }
    }

    /// Fensterbreite in Sekunden.
    pub fn window(&self) -> f32 {
        self.window
    }

    /// Prüft, ob zum Zeitpunkt `elapsed` gefeuert wird, und merkt sich den Zeitpunkt.
    pub fn should_fire(&mut self, elapsed: f32) -> bool {
        let ready = match self.last_fired {
            None => true,
            Some(last) => elapsed - last > self.window || elapsed < last,
        };
        if ready {
            self.last_fired = Some(elapsed);
        }
        ready
    }

    /// Vergisst den letzten Zeitpunkt; der nächste Aufruf feuert sofort.
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

impl Default for WakeThrottle {
    fn default() -> Self {
        Self::new(crate::shared::options::WAKE_THROTTLE_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_fires() {
        let mut throttle = WakeThrottle::new(0.016);
        assert!(throttle.should_fire(5.0));
    }

    #[test]
    fn test_fires_once_per_window() {
        let mut throttle = WakeThrottle::new(0.016);
        assert!(throttle.should_fire(0.0));
        assert!(!throttle.should_fire(0.008));
        assert!(!throttle.should_fire(0.015));
        assert!(!throttle.should_fire(0.016));
        assert!(throttle.should_fire(0.017));
        assert!(!throttle.should_fire(0.030));
    }

    #[test]
    fn test_reset_fires_immediately() {
        let mut throttle = WakeThrottle::new(1.0);
        assert!(throttle.should_fire(0.0));
        throttle.reset();
        assert!(throttle.should_fire(0.1));
    }

    #[test]
    fn test_clock_going_backwards_fires() {
        let mut throttle = WakeThrottle::new(0.016);
        assert!(throttle.should_fire(10.0));
        assert!(throttle.should_fire(0.0));
    }
}
