//! Environment source: `FOLIO_<SECTION>__<KEY>` overrides, e.g.
//! `FOLIO_HOST__START_PAGE_ID=3`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("FOLIO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
