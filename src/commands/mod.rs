pub mod convert;
pub mod plan;

use anyhow::Result;
use std::path::Path;

use crate::config;
use crate::layout::{ConversionRequest, LayoutConverter};

/// Options shared by every subcommand that builds a conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions<'a> {
    pub variant: Option<&'a str>,
    pub support_libs: Option<&'a Path>,
    pub config: Option<&'a Path>,
}

/// Load configuration and assemble the converter and request
pub fn prepare(
    app_dir: &Path,
    dest_dir: &Path,
    options: &ConvertOptions,
) -> Result<(LayoutConverter, ConversionRequest)> {
    let config = config::load_config(options.config)?;

    let converter = LayoutConverter::new(config.support_libs_dir(options.support_libs));
    let request = ConversionRequest::new(app_dir, config.variant(options.variant), dest_dir);

    Ok((converter, request))
}
