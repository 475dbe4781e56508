use std::fs;

use anyhow::Result;

#[path = "../common/mod.rs"]
mod common;
use common::{generate, read_case};

use coloracle::generator::data::{TABLE_ONE_FILE, TABLE_TWO_FILE};
use coloracle::generator::writer::MANIFEST_FILE;
use coloracle::generator::CaseStatus;
use coloracle::{ExperimentConfig, Generator, GeneratorConfig};

#[test]
fn test_generates_every_case() -> Result<()> {
    let (dir, manifest) = generate(10_000, 47)?;

    assert_eq!(manifest.cases.len(), 9);
    for (record, number) in manifest.cases.iter().zip(1..) {
        assert_eq!(record.number, number);
        assert_eq!(record.status, CaseStatus::Ok, "test {} failed: {:?}", number, record.error);
        read_case(dir.path(), number)?;
    }

    assert!(dir.path().join(TABLE_ONE_FILE).exists());
    assert!(dir.path().join(TABLE_TWO_FILE).exists());
    assert!(dir.path().join(MANIFEST_FILE).exists());
    Ok(())
}

#[test]
fn test_fixed_cases_content() -> Result<()> {
    let (dir, _) = generate(1_000, 47)?;

    let (script, expected) = read_case(dir.path(), 1)?;
    let load = format!("load(\"{}/{}\")", dir.path().display(), TABLE_ONE_FILE);
    assert!(script.contains(&load));
    assert_eq!(expected, "");

    // Two groups of two queries: 20 values each, then 13 values each
    let (script, expected) = read_case(dir.path(), 2)?;
    assert_eq!(script.matches("=select(db1.tbl1.col1,null,20)").count(), 2);
    assert_eq!(expected.lines().count(), 2 * 20 + 2 * 13);

    let (_, expected) = read_case(dir.path(), 3)?;
    let line = expected.trim_end();
    assert_eq!(line.split('.').nth(1).map(str::len), Some(2));

    let (script, expected) = read_case(dir.path(), 4)?;
    assert_eq!(script.matches("relational_insert(db1.tbl2,").count(), 10);
    assert!(script.ends_with("shutdown\n"));
    assert_eq!(expected, "");
    Ok(())
}

#[test]
fn test_sampled_ranges_recorded() -> Result<()> {
    let n = 10_000;
    let (dir, manifest) = generate(n, 5)?;

    let summation = &manifest.cases[4];
    assert_eq!(summation.ranges.len(), 1);
    assert_eq!(summation.ranges[0].high - summation.ranges[0].low, 8000);

    let (script, _) = read_case(dir.path(), 5)?;
    let r = summation.ranges[0];
    assert!(script.contains(&format!("s1=select(db1.tbl2.col1,{},{})", r.low, r.high)));

    for number in [6, 7] {
        let range = manifest.cases[number - 1].ranges[0];
        assert_eq!(range.high - range.low, 20);
    }

    let boss = &manifest.cases[8];
    assert_eq!(boss.ranges.len(), 2);
    for range in &boss.ranges {
        assert_eq!(range.high - range.low, 3162);
        assert!(range.low >= -(n as i64) / 2);
    }
    Ok(())
}

#[test]
fn test_regeneration_is_byte_identical() -> Result<()> {
    let (first, _) = generate(2_000, 11)?;
    let (second, _) = generate(2_000, 11)?;

    for number in 1..=9 {
        let a = read_case(first.path(), number)?;
        let b = read_case(second.path(), number)?;
        // Scripts embed the output directory in load(...)
        let strip = |s: &str, dir: &std::path::Path| s.replace(&dir.display().to_string(), "<dir>");
        assert_eq!(strip(&a.0, first.path()), strip(&b.0, second.path()));
        assert_eq!(a.1, b.1, "expected output of test {} differs", number);
    }
    for file in [TABLE_ONE_FILE, TABLE_TWO_FILE] {
        assert_eq!(fs::read(first.path().join(file))?, fs::read(second.path().join(file))?);
    }
    Ok(())
}

#[test]
fn test_seed_changes_table_two() -> Result<()> {
    let (a, _) = generate(500, 1)?;
    let (b, _) = generate(500, 2)?;
    assert_eq!(fs::read(a.path().join(TABLE_ONE_FILE))?, fs::read(b.path().join(TABLE_ONE_FILE))?);
    assert_ne!(fs::read(a.path().join(TABLE_TWO_FILE))?, fs::read(b.path().join(TABLE_TWO_FILE))?);
    Ok(())
}

#[test]
fn test_manifest_json() -> Result<()> {
    let (dir, _) = generate(10_000, 47)?;
    let text = fs::read_to_string(dir.path().join(MANIFEST_FILE))?;
    let json: serde_json::Value = serde_json::from_str(&text)?;

    assert_eq!(json["config"]["seed"], 47);
    assert_eq!(json["config"]["table_two_rows"], 10000);
    assert_eq!(json["cases"].as_array().map(Vec::len), Some(9));
    assert_eq!(json["cases"][8]["title"], "Big Bad Boss Test");
    assert_eq!(json["cases"][8]["status"], "ok");
    Ok(())
}

#[test]
fn test_unsamplable_range_is_recorded() -> Result<()> {
    // Too few rows for a 20-wide range: tests 6 and 7 fail, the rest are written
    let (dir, manifest) = generate(20, 47)?;

    let failed: Vec<u32> = manifest.failures().map(|c| c.number).collect();
    assert!(failed.contains(&6));
    assert!(failed.contains(&7));
    assert!(!dir.path().join("test06gen.dsl").exists());
    read_case(dir.path(), 5)?;
    Ok(())
}

#[test]
fn test_experiment_sweep() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let experiment = ExperimentConfig::new(dir.path().join("exp")).with_sizes(vec![500, 2048]);
    let config = GeneratorConfig::new(1_000)
        .with_output_dir(dir.path())
        .with_experiment(experiment.clone());
    let manifest = Generator::new(config)?.run()?;

    // 500 rows cannot satisfy col1 >= 987 and is skipped
    assert!(!experiment.size_dir(500).exists());

    let size_dir = experiment.size_dir(2048);
    let (script, _) = read_case(&size_dir, 1)?;
    assert!(script.contains(&format!("{}/{}", size_dir.display(), TABLE_ONE_FILE)));
    assert_eq!(
        fs::read_to_string(size_dir.join(TABLE_ONE_FILE))?.lines().count(),
        2049
    );

    let (script, _) = read_case(&size_dir, 2)?;
    assert!(script.contains("sum1=sum(f1)"));
    assert_eq!(manifest.cases.len(), 11);
    Ok(())
}
