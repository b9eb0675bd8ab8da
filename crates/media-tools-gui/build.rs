//! Fetches a Pdfium binary into vendor/pdfium so the pdf-preview feature
//! works out of the box. The library is bound at runtime (see
//! `pdf_to_jpg::bind_pdfium`), so no link flags are emitted here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let has_pdf_preview = env::var("CARGO_FEATURE_PDF_PREVIEW").is_ok();
    if !has_pdf_preview {
        return;
    }

    // Matches the pdfium_7543 binding requested in the workspace manifest.
    let pdfium_version = "chromium/7543";

    let target = env::var("TARGET").unwrap();
    let (platform, arch, lib_name) = match target.as_str() {
        t if t.contains("apple") => {
            let arch = if t.contains("aarch64") { "arm64" } else { "x64" };
            ("mac", arch, "libpdfium.dylib")
        }
        t if t.contains("linux") => {
            let arch = if t.contains("aarch64") { "arm64" } else { "x64" };
            ("linux", arch, "libpdfium.so")
        }
        t if t.contains("windows") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else if t.contains("i686") {
                "x86"
            } else {
                "x64"
            };
            ("win", arch, "pdfium.dll")
        }
        _ => {
            println!("cargo:warning=Unsupported target platform: {}", target);
            return;
        }
    };

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_dir = pdfium_dir.join("lib");
    let lib_path = lib_dir.join(lib_name);

    if lib_path.exists() {
        fix_library_install_name(&lib_path, platform);
        println!("cargo:rerun-if-changed={}", lib_dir.display());
        return;
    }

    println!(
        "cargo:warning=Downloading PDFium {} for {}-{}",
        pdfium_version, platform, arch
    );

    fs::create_dir_all(&lib_dir).expect("Failed to create lib directory");

    let download_url = format!(
        "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
        pdfium_version, platform, arch
    );

    let temp_file = env::temp_dir().join("pdfium.tgz");
    download_file(&download_url, &temp_file);
    extract_tarball(&temp_file, &pdfium_dir);
    let _ = fs::remove_file(&temp_file);

    if !lib_path.exists() {
        panic!(
            "PDFium installation failed: {} not found",
            lib_path.display()
        );
    }

    fix_library_install_name(&lib_path, platform);
    println!("cargo:rerun-if-changed={}", lib_dir.display());
}

fn download_file(url: &str, dest: &Path) {
    use std::io::Write;

    let response = ureq::get(url)
        .call()
        .unwrap_or_else(|e| panic!("Failed to download {}: {}", url, e));

    let mut file = fs::File::create(dest).expect("Failed to create temp file");
    std::io::copy(&mut response.into_reader(), &mut file).expect("Failed to write download");
    file.flush().expect("Failed to flush file");
}

fn extract_tarball(tarball: &Path, dest: &Path) {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let tar_gz = fs::File::open(tarball).expect("Failed to open tarball");
    let tar = GzDecoder::new(tar_gz);
    let mut archive = Archive::new(tar);
    archive.unpack(dest).expect("Failed to extract tarball");
}

fn fix_library_install_name(lib_path: &Path, platform: &str) {
    if platform != "mac" {
        return;
    }

    // Pdfium ships with an absolute install name; point it at @rpath so a
    // bundled copy resolves.
    let output = std::process::Command::new("install_name_tool")
        .arg("-id")
        .arg("@rpath/libpdfium.dylib")
        .arg(lib_path)
        .output();

    if let Ok(result) = output {
        if !result.status.success() {
            println!(
                "cargo:warning=Failed to fix install name: {}",
                String::from_utf8_lossy(&result.stderr)
            );
        }
    }
}
