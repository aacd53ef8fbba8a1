use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        if let Err(err) = fs::create_dir_all(out_dir) {
            panic!("cannot create {}: {}", out_dir.display(), err);
        }
        let options = fs_extra::dir::CopyOptions::new()
            .overwrite(true)
            .content_only(true);
        if let Err(err) = fs_extra::dir::copy(dist_dir, out_dir, &options) {
            panic!("cannot copy the frontend bundle: {}", err);
        }
    } else if let Err(err) = fs::create_dir_all(out_dir) {
        // include_dir! needs the directory even before trunk has run.
        panic!("cannot create {}: {}", out_dir.display(), err);
    }

    println!("cargo:rerun-if-changed=../frontend/dist");
}
