use semver::Version;
use std::env;

/// `gdal-sys` exposes the linked libgdal version as `GDAL_VERSION_NUM`
/// (e.g. `3070300`) through its `links` metadata.
fn detected_version() -> Option<Version> {
    let version_number = env::var("DEP_GDAL_VERSION_NUMBER").ok()?;
    let version_number = version_number.trim().parse::<u64>().ok()?;
    let major = version_number / 1_000_000;
    let minor = (version_number - major * 1_000_000) / 10_000;
    let patch = (version_number - major * 1_000_000 - minor * 10_000) / 100;
    Some(Version::new(major, minor, patch))
}

fn main() {
    println!("cargo:rerun-if-env-changed=DEP_GDAL_VERSION_NUMBER");

    let Some(detected_version) = detected_version() else {
        println!("cargo:warning=GDAL version not reported by gdal-sys, version gated APIs are disabled");
        return;
    };

    println!("cargo:rustc-cfg=major_is_{}", detected_version.major);

    // we only support GDAL >= 2.0.
    for major in 2..=detected_version.major {
        println!("cargo:rustc-cfg=major_ge_{major}");
    }

    for minor in 0..=detected_version.minor {
        println!("cargo:rustc-cfg=minor_ge_{minor}");
    }
}
