use std::env;
use std::path::PathBuf;

const WATCHED_VARIABLES: [&str; 4] = ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"];

fn warn(message: impl AsRef<str>) {
    println!("cargo:warning={}", message.as_ref());
}

/// Where vcpkg would have installed FFmpeg for the configured triplet.
fn vcpkg_install_dir(root: &str) -> PathBuf {
    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    PathBuf::from(root).join("installed").join(triplet)
}

fn main() {
    for variable in WATCHED_VARIABLES {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    // ffmpeg-sys-next finds FFmpeg through pkg-config everywhere but Windows.
    let windows = env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "windows");
    if !windows || env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    let Ok(root) = env::var("VCPKG_ROOT") else {
        warn("lumadump needs FFmpeg: set FFMPEG_DIR, or VCPKG_ROOT after `vcpkg install ffmpeg`.");
        return;
    };

    let install_dir = vcpkg_install_dir(&root);
    if !install_dir.exists() {
        warn(format!(
            "VCPKG_ROOT points at {root}, but {} does not exist.",
            install_dir.display()
        ));
        return;
    }

    warn(format!(
        "Found FFmpeg under {0}; export FFMPEG_DIR={0} so ffmpeg-sys-next links against it.",
        install_dir.display()
    ));
    if env::var_os("VCPKGRS_DYNAMIC").is_none() {
        warn("Set VCPKGRS_DYNAMIC=1 if that FFmpeg was built as DLLs.");
    }
}
