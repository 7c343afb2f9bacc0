//! Unix memory operations

use crate::error::Result;
use crate::platform::traits::{MemoryInfo, MemoryOps};

pub struct UnixMemory;

impl UnixMemory {
    pub fn new() -> Self {
        Self
    }
}

impl MemoryOps for UnixMemory {
    fn memory_info(&self) -> Result<MemoryInfo> {
        #[cfg(target_os = "linux")]
        {
            let meminfo = super::procfs::parse_meminfo(&super::procfs::read("/proc/meminfo")?);
            Ok(memory_from_meminfo(&meminfo))
        }

        #[cfg(not(target_os = "linux"))]
        {
            Err(crate::error::Error::Unsupported {
                feature: "memory statistics".to_string(),
                platform: crate::platform::Platform::name().to_string(),
            })
        }
    }
}

/// Build byte counts from the kB values in `/proc/meminfo`
#[cfg(target_os = "linux")]
fn memory_from_meminfo(meminfo: &std::collections::HashMap<String, u64>) -> MemoryInfo {
    let kb = |key: &str| meminfo.get(key).copied().unwrap_or(0) * 1024;

    let total = kb("MemTotal");
    // Kernels before 3.14 have no MemAvailable
    let available = match meminfo.get("MemAvailable") {
        Some(value) => value * 1024,
        None => kb("MemFree") + kb("Buffers") + kb("Cached"),
    };
    let swap_total = kb("SwapTotal");
    let swap_free = kb("SwapFree");

    MemoryInfo {
        total,
        available,
        used: total.saturating_sub(available),
        swap_total,
        swap_used: swap_total.saturating_sub(swap_free),
        swap_free,
    }
}
