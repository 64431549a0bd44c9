use crate::core::config::data::{path_display, Config, DEFAULT_BASE_URL};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {DEFAULT_BASE_URL})"),
        }
        match &self.launch_url {
            Some(url) => println!("  launch-url: {url}"),
            None => println!("  launch-url: (unset)"),
        }
        match self.request_timeout_secs {
            Some(secs) if secs > 0 => println!("  request-timeout: {secs}s"),
            _ => println!("  request-timeout: (none)"),
        }
        match self.settings_store() {
            Some(store) => println!("  data-dir: {}", path_display(store.dir())),
            None => println!("  data-dir: (unavailable)"),
        }
    }
}
