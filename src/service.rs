//! Capability query service

use crate::sensors::{CapabilityProvider, SensorKind};
use std::sync::Arc;

/// Answers "is sensor X available on this device" against a provider.
///
/// Holds no mutable state, so one instance can be shared across callers.
#[derive(Clone)]
pub struct CapabilityService {
    provider: Arc<dyn CapabilityProvider>,
}

impl CapabilityService {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Unrecognized and absent labels answer `false` without asking the provider.
    pub fn is_sensor_available(&self, label: Option<&str>) -> bool {
        let kind = SensorKind::from_label(label);
        let available = match kind.category() {
            Some(category) => self.provider.has_default_sensor(category),
            None => false,
        };

        tracing::debug!(?label, ?kind, available, "isSensorAvailable");
        available
    }
}

impl std::fmt::Debug for CapabilityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityService")
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::fixed::FixedProvider;
    use crate::sensors::SensorCategory;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Records how often the host registry is consulted
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl CapabilityProvider for CountingProvider {
        fn has_default_sensor(&self, _category: SensorCategory) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn service(accelerometer: bool, gyroscope: bool) -> CapabilityService {
        CapabilityService::new(Arc::new(FixedProvider::new(accelerometer, gyroscope)))
    }

    #[test]
    fn test_recognized_labels_follow_provider() {
        let all = service(true, true);
        assert!(all.is_sensor_available(Some("Accelerometer")));
        assert!(all.is_sensor_available(Some("Gyroscope")));

        let none = service(false, false);
        assert!(!none.is_sensor_available(Some("Accelerometer")));
        assert!(!none.is_sensor_available(Some("Gyroscope")));
    }

    #[test]
    fn test_accelerometer_without_gyroscope() {
        let svc = service(true, false);
        assert!(svc.is_sensor_available(Some("Accelerometer")));
        assert!(!svc.is_sensor_available(Some("Gyroscope")));
    }

    #[test]
    fn test_unrecognized_labels_are_false() {
        let svc = service(true, true);
        for label in ["", "accelerometer", "gyroscope", "Magnetometer"] {
            assert!(!svc.is_sensor_available(Some(label)), "{label:?}");
        }
        assert!(!svc.is_sensor_available(None));
    }

    #[test]
    fn test_unknown_label_skips_provider() {
        let provider = Arc::new(CountingProvider::default());
        let svc = CapabilityService::new(provider.clone());

        assert!(!svc.is_sensor_available(Some("Barometer")));
        assert!(!svc.is_sensor_available(None));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        assert!(svc.is_sensor_available(Some("Gyroscope")));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_idempotent() {
        let svc = service(false, true);
        let first = svc.is_sensor_available(Some("Gyroscope"));
        for _ in 0..10 {
            assert_eq!(svc.is_sensor_available(Some("Gyroscope")), first);
        }
    }

    #[test]
    fn test_concurrent_callers() {
        let svc = service(true, false);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                thread::spawn(move || {
                    (0..100).all(|_| {
                        svc.is_sensor_available(Some("Accelerometer"))
                            && !svc.is_sensor_available(Some("Gyroscope"))
                    })
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
