use std::env;
use std::fs;

const API_CONFIG: &str = "assets/api.config.json";

fn main() {
    // api.config.json はコンパイル時に埋め込むので存在だけ確認
    if fs::metadata(API_CONFIG).is_err() {
        println!("cargo:warning=Could not read {}", API_CONFIG);
    }

    // CALC_API_BASE_URL が指定されていれば base_url を上書き
    if let Ok(url) = env::var("CALC_API_BASE_URL") {
        if !url.trim().is_empty() {
            println!("cargo:warning=CALC_API_BASE_URL override set to {}", url);
        }
    }

    println!("cargo:rerun-if-changed={}", API_CONFIG);
    println!("cargo:rerun-if-env-changed=CALC_API_BASE_URL");
}
