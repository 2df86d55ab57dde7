use std::fs;
use translit_core::config::{DriverConfig, FileConfig};
use translit_core::core::types::{OutputLayout, Scheme};
use translit_core::persistence::{open_input, write_atomically, write_buffered};
use translit_core::{BatchEngine, TranslitError};

fn convert(config: DriverConfig, input: &str) -> Result<String, TranslitError> {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("wx.txt");
    let out_path = dir.path().join("out").join("converted.txt");
    fs::write(&in_path, input).unwrap();

    let engine = BatchEngine::new(config);
    let reader = open_input(&in_path)?;
    write_atomically(&out_path, |w| engine.run(reader, w))?;
    Ok(fs::read_to_string(&out_path).unwrap())
}

#[test]
fn wx_dataset_file() {
    let input = "1 apane\n2 evaM\n3 miSr\n4 Yaha\n5 nahIM\n";
    let out = convert(DriverConfig::for_scheme(Scheme::Wx), input).unwrap();
    assert_eq!(
        out,
        "1 apane अपने\n2 evaM एवं\n3 miSr मिश\u{94d}र\n4 Yaha #Yaha\n5 nahIM नहीं\n"
    );
}

#[test]
fn slp_dataset_file() {
    let input = "10 kZ\n11 @@\n12 SivaH\n";
    let out = convert(DriverConfig::for_scheme(Scheme::Slp), input).unwrap();
    assert_eq!(out, "10\t\u{958}\n12\tशइवअ\u{903}\n");
}

#[test]
fn failed_run_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("wx.txt");
    let out_path = dir.path().join("converted.txt");
    fs::write(&in_path, "1 ka\n2 k+\n").unwrap();

    let engine = BatchEngine::new(DriverConfig::for_scheme(Scheme::Wx));
    let reader = open_input(&in_path).unwrap();
    let result = write_atomically(&out_path, |w| engine.run(reader, w));
    assert!(matches!(result, Err(TranslitError::UnknownSymbol { symbol: '+', .. })));
    assert!(!out_path.exists());
}

#[test]
fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("translit.json");
    fs::write(&config_path, r#"{"layout": "json", "markers": "q"}"#).unwrap();

    let file = FileConfig::load(&config_path).unwrap();
    let config = DriverConfig::resolve(&file, Some(Scheme::Wx));
    assert_eq!(config.layout, OutputLayout::Json);

    let out = convert(config, "1 qa\n2 ka\n").unwrap();
    let rows: Vec<serde_json::Value> =
        out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(rows[0]["converted"], serde_json::Value::Null);
    assert_eq!(rows[1]["token"], "ka");
    assert_eq!(rows[1]["converted"], "क");
}

#[test]
fn failed_run_prints_no_rows() {
    let engine = BatchEngine::new(DriverConfig::for_scheme(Scheme::Wx));
    let mut stdout = Vec::new();
    let result = write_buffered(&mut stdout, |w| engine.run("1 ka\n2 k-a\n".as_bytes(), w));
    assert!(matches!(result, Err(TranslitError::UnknownSymbol { symbol: '-', .. })));
    assert!(stdout.is_empty());

    let stats = write_buffered(&mut stdout, |w| engine.run("1 ka\n".as_bytes(), w)).unwrap();
    assert_eq!(stats.converted, 1);
    assert_eq!(String::from_utf8(stdout).unwrap(), "1 ka क\n");
}
