//! External system integrations for Derrick.
//!
//! - [`database`] - Record store abstraction (trait-based)
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The pipeline only sees the
//! [`database::RecordStore`] trait.
//!
//! ```rust,no_run
//! use derrick::adapters::database::create_record_store;
//! use derrick::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("derrick.toml")?;
//! let store = create_record_store(&config).await?;
//! store.test_connection().await?;
//! let stats = store.fetch_statistics().await?;
//! stats.log();
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
