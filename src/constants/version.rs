use semver::Version;

const SEASONS: [&str; 4] = ["Winter", "Spring", "Summer", "Autumn"];

/// version string shown by `status`, e.g. `2025.10.1 - Autumn`.
pub fn get_version() -> String {
    let semver = env!("CARGO_PKG_VERSION").parse::<Version>();

    match semver {
        Ok(semver) => format!("{} - {}", semver, season_name(&semver)),
        Err(e) => {
            tracing::warn!(err = ?e, "couldn't parse a semver out of Cargo.toml? defaulting to 0.0.0-unknown.");
            String::from("0.0.0-unknown - No Season")
        }
    }
}

// calendar versioning: the minor component is the release month.
fn season_name(version: &Version) -> &'static str {
    match version.minor {
        1..=12 => SEASONS[((version.minor % 12) / 3) as usize],
        _ => "No Season",
    }
}
