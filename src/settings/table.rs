//! Bounded-setting table and the operational settings it populates.
//!
//! Each [`BoundSetting`] binds a case-insensitive key to one field of
//! [`OperationalSettings`] together with its default and accepted range.
//! The table is scanned top to bottom and the first matching key wins,
//! so keys must never be prefixes of later keys with a whitespace gap.

use std::time::Duration;

use serde::Serialize;

/// A field of [`OperationalSettings`] addressable from the setting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    /// EAP exchange timeout in seconds.
    EapTimeout,
    /// Roam trigger delta.
    RoamDelta,
    /// Active scan dwell time.
    ScanDwellTime,
    /// Delay between scan channels.
    ScanDelayTime,
    /// Passive scan dwell time.
    ScanPassiveDwellTime,
    /// Scan suspend time.
    ScanSuspendTime,
    /// Disable DFS channels (0 or 1).
    DfsDisable,
    /// Directed multicast service mode.
    Dms,
}

/// Numeric operational parameters seeded from the settings source.
///
/// Built once by [`SettingsLoader`](super::SettingsLoader) and handed by
/// reference to whatever needs it. A value of zero in a field whose table
/// entry allows zero means "unset"; the `Option` accessors expose that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationalSettings {
    /// EAP exchange timeout in seconds.
    pub eap_timeout: u32,
    /// Roam trigger delta.
    pub roam_delta: u32,
    /// Active scan dwell time.
    pub scan_dwell_time: u32,
    /// Delay between scan channels.
    pub scan_delay_time: u32,
    /// Passive scan dwell time.
    pub scan_passive_dwell_time: u32,
    /// Scan suspend time.
    pub scan_suspend_time: u32,
    /// Disable DFS channels.
    pub dfs_disable: u32,
    /// Directed multicast service mode.
    pub dms: u32,
}

impl OperationalSettings {
    /// Returns settings with every table entry at its default.
    #[must_use]
    pub fn defaults() -> Self {
        let mut settings = Self {
            eap_timeout: 0,
            roam_delta: 0,
            scan_dwell_time: 0,
            scan_delay_time: 0,
            scan_passive_dwell_time: 0,
            scan_suspend_time: 0,
            dfs_disable: 0,
            dms: 0,
        };
        settings.reset(&SETTINGS);
        settings
    }

    /// Resets every field bound by `table` to its default.
    pub fn reset(&mut self, table: &[BoundSetting]) {
        for setting in table {
            *self.slot(setting.field) = setting.default;
        }
    }

    /// Returns the current value of `field`.
    #[must_use]
    pub const fn get(&self, field: SettingField) -> u32 {
        match field {
            SettingField::EapTimeout => self.eap_timeout,
            SettingField::RoamDelta => self.roam_delta,
            SettingField::ScanDwellTime => self.scan_dwell_time,
            SettingField::ScanDelayTime => self.scan_delay_time,
            SettingField::ScanPassiveDwellTime => self.scan_passive_dwell_time,
            SettingField::ScanSuspendTime => self.scan_suspend_time,
            SettingField::DfsDisable => self.dfs_disable,
            SettingField::Dms => self.dms,
        }
    }

    /// Returns a mutable reference to the storage behind `field`.
    pub const fn slot(&mut self, field: SettingField) -> &mut u32 {
        match field {
            SettingField::EapTimeout => &mut self.eap_timeout,
            SettingField::RoamDelta => &mut self.roam_delta,
            SettingField::ScanDwellTime => &mut self.scan_dwell_time,
            SettingField::ScanDelayTime => &mut self.scan_delay_time,
            SettingField::ScanPassiveDwellTime => &mut self.scan_passive_dwell_time,
            SettingField::ScanSuspendTime => &mut self.scan_suspend_time,
            SettingField::DfsDisable => &mut self.dfs_disable,
            SettingField::Dms => &mut self.dms,
        }
    }

    /// EAP exchange timeout.
    #[must_use]
    pub const fn eap_timeout(&self) -> Duration {
        Duration::from_secs(self.eap_timeout as u64)
    }

    /// Roam delta, or `None` when unset.
    #[must_use]
    pub const fn roam_delta(&self) -> Option<u32> {
        non_zero(self.roam_delta)
    }

    /// Active scan dwell time, or `None` when unset.
    #[must_use]
    pub const fn scan_dwell_time(&self) -> Option<u32> {
        non_zero(self.scan_dwell_time)
    }

    /// Scan delay time, or `None` when unset.
    #[must_use]
    pub const fn scan_delay_time(&self) -> Option<u32> {
        non_zero(self.scan_delay_time)
    }

    /// Passive scan dwell time, or `None` when unset.
    #[must_use]
    pub const fn scan_passive_dwell_time(&self) -> Option<u32> {
        non_zero(self.scan_passive_dwell_time)
    }

    /// Scan suspend time, or `None` when unset.
    #[must_use]
    pub const fn scan_suspend_time(&self) -> Option<u32> {
        non_zero(self.scan_suspend_time)
    }

    /// Whether DFS channels are disabled.
    #[must_use]
    pub const fn dfs_disabled(&self) -> bool {
        self.dfs_disable != 0
    }

    /// DMS mode, or `None` when unset.
    #[must_use]
    pub const fn dms(&self) -> Option<u32> {
        non_zero(self.dms)
    }
}

impl Default for OperationalSettings {
    fn default() -> Self {
        Self::defaults()
    }
}

const fn non_zero(value: u32) -> Option<u32> {
    if value == 0 { None } else { Some(value) }
}

/// One entry of the bounded-setting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundSetting {
    /// Key matched case-insensitively at the start of a line.
    pub key: &'static str,
    /// Field written when the key matches.
    pub field: SettingField,
    /// Value restored before every load.
    pub default: u32,
    /// Smallest accepted non-zero value.
    pub min: u32,
    /// Largest accepted value.
    pub max: u32,
    /// Whether an explicit zero ("unset") is accepted regardless of `min`.
    pub allow_zero: bool,
}

impl BoundSetting {
    /// Returns whether `value` may be written to this setting.
    #[must_use]
    pub const fn accepts(&self, value: u64) -> bool {
        (self.min as u64 <= value && value <= self.max as u64) || (self.allow_zero && value == 0)
    }

    /// Human-readable accepted range, e.g. `"3..=60"` or `"0 or 10..=250"`.
    #[must_use]
    pub fn expected(&self) -> String {
        if self.allow_zero && self.min > 0 {
            format!("0 or {}..={}", self.min, self.max)
        } else {
            format!("{}..={}", self.min, self.max)
        }
    }

    /// Returns whether the default satisfies the entry's own bounds.
    #[must_use]
    pub const fn default_in_bounds(&self) -> bool {
        self.accepts(self.default as u64)
    }
}

/// All known settings. `DMS` is last so profiles without it can take a
/// prefix slice; see [`table_for`].
pub static SETTINGS: [BoundSetting; 8] = [
    BoundSetting {
        key: "EAPTIMEOUT",
        field: SettingField::EapTimeout,
        default: 10,
        min: 3,
        max: 60,
        allow_zero: false,
    },
    BoundSetting {
        key: "ROAMDELTA",
        field: SettingField::RoamDelta,
        default: 0,
        min: 0,
        max: 10,
        allow_zero: true,
    },
    BoundSetting {
        key: "SCANDWELLTIME",
        field: SettingField::ScanDwellTime,
        default: 0,
        min: 10,
        max: 250,
        allow_zero: true,
    },
    BoundSetting {
        key: "SCANDELAYTIME",
        field: SettingField::ScanDelayTime,
        default: 0,
        min: 10,
        max: 250,
        allow_zero: true,
    },
    BoundSetting {
        key: "SCANPASSIVEDWELLTIME",
        field: SettingField::ScanPassiveDwellTime,
        default: 0,
        min: 10,
        max: 250,
        allow_zero: true,
    },
    BoundSetting {
        key: "SCANSUSPENDTIME",
        field: SettingField::ScanSuspendTime,
        default: 0,
        min: 10,
        max: 250,
        allow_zero: true,
    },
    BoundSetting {
        key: "DFSDISABLE",
        field: SettingField::DfsDisable,
        default: 0,
        min: 0,
        max: 1,
        allow_zero: true,
    },
    BoundSetting {
        key: "DMS",
        field: SettingField::Dms,
        default: 0,
        min: 0,
        max: 6,
        allow_zero: true,
    },
];

/// Returns the table slice for a profile, with or without the DMS entry.
#[must_use]
pub fn table_for(include_dms: bool) -> &'static [BoundSetting] {
    if include_dms {
        &SETTINGS
    } else {
        &SETTINGS[..SETTINGS.len() - 1]
    }
}
