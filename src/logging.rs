use log::LevelFilter;

/// Initialize logging using env_logger.
/// `RUST_LOG` takes precedence over the level picked from the options file,
/// e.g. `RUST_LOG=pngtuber=trace pngtuber bot ...`
pub fn init_logging(options: &crate::options::Options) {
    env_logger::Builder::new()
        .filter_level(level(options))
        .parse_default_env()
        .init();
}

fn level(options: &crate::options::Options) -> LevelFilter {
    if options.exec.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    #[test]
    fn debug_option_raises_level() {
        let mut options = Options::default();
        assert_eq!(level(&options), LevelFilter::Info);
        options.exec.debug = true;
        assert_eq!(level(&options), LevelFilter::Debug);
    }
}
