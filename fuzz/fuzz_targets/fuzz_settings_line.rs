#![no_main]

use libfuzzer_sys::fuzz_target;
use gtc_peer::settings::{SettingsLoader, SettingsProfile};

fuzz_target!(|data: &[u8]| {
    let loader = SettingsLoader::new(SettingsProfile::laird().with_dms(true));
    let report = loader.load_from_reader(data);

    // Whatever the input, every stored value must satisfy its bound
    for setting in loader.profile().table() {
        assert!(setting.accepts(u64::from(report.settings.get(setting.field))));
    }
});
