//! Output generation for a finished check.
//!
//! # Submodules
//!
//! - [`terminal`]: Renders the report as text cards on stdout
//! - [`json`]: Writes the report to a JSON file for later inspection
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2025-05-06/
//! │   ├── 203000_nasa-confirms-water-on-mars.json
//! │   └── 211512_moon-landing-was-staged.json
//! ```

pub mod json;
pub mod terminal;
