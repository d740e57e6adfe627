// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use super::*;
use wideband_pbcor::{Action, PbcorArgs, PbcorArgsError};

#[test]
fn toml_and_json_arg_files_agree() {
    let dir = TempDir::new().unwrap();
    let (toml_path, mut toml_file) = make_file_in_dir("args.toml", dir.path());
    writeln!(
        toml_file,
        r#"nterms = 3
threshold = "0.5 mJy"
reffreq = "1500 MHz"
pbmin = 0.2"#
    )
    .unwrap();
    let (json_path, mut json_file) = make_file_in_dir("args.json", dir.path());
    writeln!(
        json_file,
        r#"{{"nterms": 3, "threshold": "0.5 mJy", "reffreq": "1500 MHz", "pbmin": 0.2}}"#
    )
    .unwrap();

    let from_toml = PbcorArgs::from_arg_file(&toml_path).unwrap();
    let from_json = PbcorArgs::from_arg_file(&json_path).unwrap();
    assert_eq!(from_toml, from_json);

    let params = from_toml.parse(None).unwrap();
    assert_eq!(params.nterms, 3);
    assert_eq!(params.action, Action::PbCor);
    assert_abs_diff_eq!(params.threshold_jy, 5e-4, epsilon = 1e-15);
    assert_abs_diff_eq!(params.ref_freq_ghz, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(params.pb_threshold, 0.2);
}

#[test]
fn command_line_args_override_arg_file() {
    let dir = TempDir::new().unwrap();
    let (path, mut file) = make_file_in_dir("args.toml", dir.path());
    writeln!(file, "nterms = 3\naction = \"calcalpha\"").unwrap();

    let cli_args = PbcorArgs {
        action: Some("pbcor".to_string()),
        ..Default::default()
    };
    let params = cli_args
        .merge(PbcorArgs::from_arg_file(&path).unwrap())
        .parse(Some(1.4))
        .unwrap();
    assert_eq!(params.nterms, 3);
    assert_eq!(params.action, Action::PbCor);
    assert_abs_diff_eq!(params.ref_freq_ghz, 1.4);
}

#[test]
fn missing_arg_file() {
    let dir = TempDir::new().unwrap();
    let result = PbcorArgs::from_arg_file(&dir.path().join("nothing.toml"));
    assert!(matches!(result, Err(PbcorArgsError::IO(_))));
}
