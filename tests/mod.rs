pub mod integration;

// Re-export common utilities
pub use common::{init, mock::*, test_utils::*};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup() {
        init();
        init();
    }
}

// Test macros
#[macro_export]
macro_rules! bus_test {
    ($name:ident, $body:expr) => {
        #[test]
        fn $name() -> anyhow::Result<()> {
            crate::common::init();
            $body
        }
    };
}
