use std::sync::Arc;

use strum::EnumCount;

use crate::{
    collector::{Collector, SampleTransformer},
    config::SamplingConfig,
    samples::{AppDomainId, Frame, RawSample, ValueType, WallTimeValues},
    stores::{AppDomainMap, FrameCache, RuntimeIdMap},
};

/// App-domain known to the fixture stores
pub const FIXTURE_APP_DOMAIN: AppDomainId = AppDomainId(1);

/// Runtime id of [`FIXTURE_APP_DOMAIN`]
pub const FIXTURE_RUNTIME_ID: &str = "01234567-89ab-cdef-0123-456789abcdef";

/// Stores populated with one app-domain and three resolvable frames at 0x1000, 0x2000 and 0x3000
pub struct FixtureStores {
    pub frames: Arc<FrameCache>,
    pub app_domains: Arc<AppDomainMap>,
    pub runtime_ids: Arc<RuntimeIdMap>,
}

impl FixtureStores {
    pub fn new() -> Self {
        let frames = FrameCache::new();
        frames.insert(
            0x1000,
            Frame::new("System.Private.CoreLib.dll", "Thread.Sleep"),
        );
        frames.insert(0x2000, Frame::new("App.dll", "Worker.Run"));
        frames.insert(0x3000, Frame::new("App.dll", "Program.Main"));

        let app_domains = AppDomainMap::new();
        app_domains.insert(FIXTURE_APP_DOMAIN, 4242, "DefaultDomain");

        let runtime_ids = RuntimeIdMap::new();
        runtime_ids.insert(
            FIXTURE_APP_DOMAIN,
            FIXTURE_RUNTIME_ID.parse().expect("valid fixture guid"),
        );

        FixtureStores {
            frames: Arc::new(frames),
            app_domains: Arc::new(app_domains),
            runtime_ids: Arc::new(runtime_ids),
        }
    }

    pub fn transformer(&self, timestamps_as_label: bool) -> SampleTransformer<'_> {
        SampleTransformer::new(
            self.frames.as_ref(),
            self.app_domains.as_ref(),
            self.runtime_ids.as_ref(),
            timestamps_as_label,
            ValueType::COUNT,
        )
    }
}

// Helper function to create the fixture stores
pub fn fixture_stores() -> FixtureStores {
    FixtureStores::new()
}

// Helper function to create a wall time collector over the fixture stores
pub fn fixture_collector(config: SamplingConfig) -> Collector<WallTimeValues> {
    let stores = FixtureStores::new();
    Collector::new(
        "WallTimeProvider",
        ValueType::WallTime.index(),
        stores.frames,
        stores.app_domains,
        stores.runtime_ids,
        config,
    )
}

// Helper function to create a wall time raw sample in the fixture app-domain, without thread
pub fn raw_wall_sample(timestamp: u64, duration_ns: i64) -> RawSample<WallTimeValues> {
    RawSample::new(
        timestamp,
        FIXTURE_APP_DOMAIN,
        WallTimeValues { duration_ns },
    )
}
