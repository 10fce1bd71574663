pub mod io;
pub mod locate;
pub mod package_json;

pub use io::read_package_json;
pub use locate::{find_package_dir, locate_entry};
pub use package_json::PackageJson;
