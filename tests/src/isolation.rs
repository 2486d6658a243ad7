use std::sync::atomic::{AtomicU32, Ordering};

/// Generates unique schema names for test isolation.
///
/// Each test gets its own schema named `dbmap_{process_id}_{test_counter}`, so tests
/// running in parallel (within or across processes) never see each other's tables.
#[derive(Clone)]
#[allow(dead_code)] // Only used by server engine setups
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

// Global counter shared across all tests in this process
#[allow(dead_code)]
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

#[allow(dead_code)]
impl TestIsolation {
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn schema(&self) -> String {
        format!("dbmap_{}_{}", self.process_id, self.test_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolation_generates_unique_schemas() {
        let isolation1 = TestIsolation::new();
        let isolation2 = TestIsolation::new();

        assert_ne!(isolation1.schema(), isolation2.schema());
        assert!(isolation1.schema().starts_with("dbmap_"));
    }

    #[test]
    fn test_schema_format() {
        let schema = TestIsolation::new().schema();

        // Should match format: dbmap_{process_id}_{counter}
        let parts: Vec<&str> = schema.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "dbmap");
        assert!(parts[1].parse::<u32>().is_ok());
        assert!(parts[2].parse::<u32>().is_ok());
    }
}
