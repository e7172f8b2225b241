//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get an lbm command
pub fn lbm() -> Command {
    Command::new(cargo::cargo_bin!("lbm"))
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    lbm().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

fn grab_id(output: &std::process::Output, prefix: &str) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|l| l.contains(prefix))
        .and_then(|l| l.split_whitespace().find(|w| w.starts_with(prefix)))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Helper to create a test item, returning its full ID
pub fn create_test_item(tmp: &TempDir, code: &str, name: &str, kind: &str) -> String {
    let output = lbm()
        .current_dir(tmp.path())
        .args(["item", "new", "--code", code, "--name", name, "--kind", kind])
        .output()
        .unwrap();
    grab_id(&output, "ITEM-")
}

/// Helper to create a test product, returning its full ID
pub fn create_test_product(tmp: &TempDir, code: &str, root_item: &str) -> String {
    let output = lbm()
        .current_dir(tmp.path())
        .args([
            "product",
            "new",
            "--code",
            code,
            "--name",
            code,
            "--root-item",
            root_item,
        ])
        .output()
        .unwrap();
    grab_id(&output, "PROD-")
}

/// Helper to create a test BOM version, returning its full ID
pub fn create_test_version(tmp: &TempDir, product: &str, label: &str) -> String {
    let output = lbm()
        .current_dir(tmp.path())
        .args(["version", "new", "--product", product, "--label", label])
        .output()
        .unwrap();
    grab_id(&output, "VER-")
}

/// Helper to add a BOM line, returning its full ID
pub fn add_test_line(
    tmp: &TempDir,
    version: &str,
    parent: &str,
    item: &str,
    qty: u32,
    position: u32,
) -> String {
    let output = lbm()
        .current_dir(tmp.path())
        .args([
            "line",
            "add",
            "--version",
            version,
            "--parent",
            parent,
            "--item",
            item,
            "--qty",
            &qty.to_string(),
            "--position",
            &position.to_string(),
        ])
        .output()
        .unwrap();
    grab_id(&output, "LINE-")
}

/// Helper to add a BOM line with an explicit status
pub fn add_test_line_with_status(
    tmp: &TempDir,
    version: &str,
    parent: &str,
    item: &str,
    qty: u32,
    position: u32,
    status: &str,
) -> String {
    let output = lbm()
        .current_dir(tmp.path())
        .args([
            "line",
            "add",
            "--version",
            version,
            "--parent",
            parent,
            "--item",
            item,
            "--qty",
            &qty.to_string(),
            "--position",
            &position.to_string(),
            "--status",
            status,
        ])
        .output()
        .unwrap();
    grab_id(&output, "LINE-")
}

/// A small seeded BOM: product/version over root -> sub -> leaf
pub struct SeededBom {
    pub tmp: TempDir,
    pub root: String,
    pub sub: String,
    pub leaf: String,
    pub version: String,
}

/// Seed root(assembly) -> sub(subassembly, qty 2) -> leaf(part, qty 3)
pub fn seed_chain_bom() -> SeededBom {
    let tmp = setup_test_project();
    let root = create_test_item(&tmp, "ROOT-1", "Gearbox", "assembly");
    let sub = create_test_item(&tmp, "SUB-1", "Housing", "subassembly");
    let leaf = create_test_item(&tmp, "LEAF-1", "Seal Ring", "part");
    let product = create_test_product(&tmp, "GBX", &root);
    let version = create_test_version(&tmp, &product, "A");
    add_test_line(&tmp, &version, &root, &sub, 2, 10);
    add_test_line(&tmp, &version, &sub, &leaf, 3, 10);
    SeededBom {
        tmp,
        root,
        sub,
        leaf,
        version,
    }
}
