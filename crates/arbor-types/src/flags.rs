use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Per-resource flag bits.
    ///
    /// Bit values match the persisted layout; unknown bits read from storage
    /// are retained untouched.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ResourceFlags: u32 {
        /// The resource has siblings that are tracked as labeled links.
        const LABELED = 2;
        /// The resource is internal and not directly addressable by visitors.
        const INTERNAL = 512;
        /// The resource is a temporary editing copy.
        const TEMPFILE = 1024;

        const _ = !0;
    }
}

impl Default for ResourceFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResourceFlags {
    /// Raw persisted value.
    pub fn value(&self) -> u32 {
        self.bits()
    }

    /// Build from a persisted value, keeping unknown bits.
    pub fn from_value(value: u32) -> Self {
        Self::from_bits_retain(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_survive() {
        let flags = ResourceFlags::from_value(1024 | 4096);
        assert!(flags.contains(ResourceFlags::TEMPFILE));
        assert_eq!(flags.value(), 1024 | 4096);
    }

    #[test]
    fn combine_and_remove() {
        let mut flags = ResourceFlags::INTERNAL | ResourceFlags::TEMPFILE;
        flags.remove(ResourceFlags::TEMPFILE);
        assert_eq!(flags, ResourceFlags::INTERNAL);
        assert!(ResourceFlags::default().is_empty());
    }
}
