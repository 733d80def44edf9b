use super::{Connect, Db};
use crate::{engine::Engine, Result};

use rowmap_core::driver::Driver;

#[derive(Debug)]
pub struct Builder {
    /// Default caching policy for new result streams
    cache_results: bool,
}

impl Builder {
    /// Sets whether new result streams keep the records they yield.
    ///
    /// Individual streams can still opt out with
    /// [`ResultStream::nocache`](crate::ResultStream::nocache).
    pub fn cache_results(&mut self, enabled: bool) -> &mut Self {
        self.cache_results = enabled;
        self
    }

    pub fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?)
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let engine = Engine::new(Box::new(driver), self.cache_results)?;
        Db::new(engine)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            cache_results: true,
        }
    }
}
