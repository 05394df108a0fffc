use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use gz10::{
    generate_examples, BuilderConfig, CatalogShard, DataFiles, Error, Example, ObjectId, Record,
    Resolver, ShardEncoder, Variant,
};
use tempfile::TempDir;

const IMAGE_SHAPE: [u32; 3] = [4, 4, 3];

fn encode(ids: &[i64], labels: &[u8], redshift: &[f32], images: bool) -> Vec<u8> {
    let mut encoder = ShardEncoder::new();
    encoder
        .add_column("object_id", &[], ids)
        .unwrap()
        .add_column("ans", &[], labels)
        .unwrap()
        .add_column("redshift", &[], redshift)
        .unwrap();
    if images {
        let per_row = IMAGE_SHAPE.iter().product::<u32>() as usize;
        let pixels: Vec<u8> = (0..ids.len() * per_row).map(|i| (i % 251) as u8).collect();
        let scale = vec![0.262f32; ids.len()];
        encoder
            .add_column("images", &IMAGE_SHAPE, &pixels)
            .unwrap()
            .add_column("pxscale", &[], &scale)
            .unwrap();
    }
    encoder.finish().unwrap()
}

fn write(dir: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, bytes).unwrap();
    path
}

fn sample_catalog(images: bool) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "datafiles/healpix=1/shard.gzs",
        &encode(&[10, 20, 30], &[2, 5, 9], &[0.1, 0.2, 0.3], images),
    );
    (dir, path)
}

fn collect(examples: impl Iterator<Item = gz10::Result<Example>>) -> Vec<Example> {
    examples.map(|item| item.unwrap()).collect()
}

fn field_set(record: &Record) -> BTreeSet<String> {
    match serde_json::to_value(record).unwrap() {
        serde_json::Value::Object(map) => map.keys().cloned().collect(),
        other => panic!("record serialized to {other}"),
    }
}

#[test]
fn requested_id_yields_its_row() {
    let (_dir, path) = sample_catalog(false);
    let examples = collect(
        generate_examples(vec![path], Some(vec![vec![ObjectId::Int(20)]]), Variant::Gz10)
            .unwrap(),
    );

    assert_eq!(examples.len(), 1);
    let (key, record) = &examples[0];
    assert_eq!(key, "20");
    assert_eq!(record.gz10_label(), 5);
    assert!((record.redshift() - 0.2).abs() < 1e-6);
    assert_eq!(record.object_id(), "20");
}

#[test]
fn records_carry_exactly_the_variant_fields() {
    let (_dir, path) = sample_catalog(true);

    for variant in Variant::ALL {
        let examples = collect(generate_examples(vec![path.clone()], None, variant).unwrap());
        assert_eq!(examples.len(), 3);

        let expected: BTreeSet<String> =
            variant.features().iter().map(|f| f.name.to_string()).collect();
        for (_, record) in &examples {
            assert_eq!(field_set(record), expected);
            assert_eq!(record.variant(), variant);
            let names: BTreeSet<String> =
                record.field_names().iter().map(|n| n.to_string()).collect();
            assert_eq!(names, expected);
        }
    }
}

#[test]
fn image_fields_come_from_the_same_row() {
    let (_dir, path) = sample_catalog(true);
    let shard = CatalogShard::open(&path, Variant::Gz10RgbImages).unwrap();
    let resolver = Resolver::build(&shard).unwrap();

    let row = resolver.resolve(&ObjectId::Int(30)).unwrap();
    let record = shard.read_record(row).unwrap();
    let image = record.rgb_image().unwrap();
    assert_eq!((image.height, image.width, image.channels), (4, 4, 3));
    // Row 2 starts at pixel 2 * 48
    assert_eq!(image.pixels[0], 96);
    assert_eq!(record.rgb_pixel_scale(), Some(0.262));
}

#[test]
fn every_stored_id_resolves_to_its_row() {
    let ids = [907i64, -12, 55, 3, 1_000_000, 0, 41];
    let labels: Vec<u8> = (0..ids.len() as u8).collect();
    let redshift = vec![0.5f32; ids.len()];
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "s.gzs", &encode(&ids, &labels, &redshift, false));

    let shard = CatalogShard::open(&path, Variant::Gz10).unwrap();
    let resolver = Resolver::build(&shard).unwrap();
    let stored = shard.read_identifiers().unwrap();
    for &id in &ids {
        let row = resolver.resolve(&ObjectId::Int(id)).unwrap();
        assert_eq!(stored[row], ObjectId::Int(id));
    }
    assert!(matches!(
        resolver.resolve(&ObjectId::Int(2)),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn duplicate_ids_resolve_deterministically() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "dup.gzs",
        &encode(&[5, 1, 3, 1], &[0, 1, 2, 3], &[0.0; 4], false),
    );
    let shard = CatalogShard::open(&path, Variant::Gz10).unwrap();
    let resolver = Resolver::build(&shard).unwrap();

    let rows: Vec<usize> = (0..5)
        .map(|_| resolver.resolve(&ObjectId::Int(1)).unwrap())
        .collect();
    assert!(rows.iter().all(|&row| row == 1));
}

#[test]
fn missing_id_is_yielded_and_generation_continues() {
    let (_dir, path) = sample_catalog(false);
    let ids = vec![vec![ObjectId::Int(10), ObjectId::Int(15), ObjectId::Int(30)]];
    let items: Vec<_> = generate_examples(vec![path], Some(ids), Variant::Gz10)
        .unwrap()
        .collect();

    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok());
    match &items[1] {
        Err(Error::NotFound { key, .. }) => assert_eq!(key, "15"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(items[2].as_ref().unwrap().0, "30");
}

#[test]
fn shard_without_image_columns_is_skipped_for_image_variant() {
    let dir = TempDir::new().unwrap();
    let plain = write(dir.path(), "plain.gzs", &encode(&[1], &[0], &[0.1], false));
    let full = write(dir.path(), "full.gzs", &encode(&[2], &[1], &[0.2], true));

    let items: Vec<_> = generate_examples(vec![plain, full], None, Variant::Gz10RgbImages)
        .unwrap()
        .collect();
    assert_eq!(items.len(), 2);
    match &items[0] {
        Err(Error::MissingColumn { column, .. }) => assert_eq!(column, "images"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
    assert_eq!(items[1].as_ref().unwrap().0, "2");
}

#[test]
fn malformed_shard_is_reported() {
    let dir = TempDir::new().unwrap();
    let junk = write(dir.path(), "junk.gzs", &[0u8; 128]);
    let items: Vec<_> = generate_examples(vec![junk], None, Variant::Gz10)
        .unwrap()
        .collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(Error::InvalidShard { .. })));
}

#[test]
fn no_files_is_a_configuration_error() {
    assert!(matches!(
        generate_examples(Vec::new(), None, Variant::default()),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn traversals_are_repeatable() {
    let (_dir, path) = sample_catalog(true);
    let ids = Some(vec![vec![ObjectId::Int(30), ObjectId::from("10")]]);

    let first = collect(generate_examples(vec![path.clone()], ids.clone(), Variant::default()).unwrap());
    let second = collect(generate_examples(vec![path], ids, Variant::default()).unwrap());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn dropping_early_releases_the_shard() {
    let (dir, path) = sample_catalog(false);
    {
        let mut examples = generate_examples(vec![path.clone()], None, Variant::Gz10).unwrap();
        assert!(examples.next().unwrap().is_ok());
        assert_eq!(examples.open_shard(), Some(path.as_path()));
    }
    // Nothing holds the file after the iterator is gone
    fs::remove_file(&path).unwrap();
    drop(dir);
}

#[test]
fn config_discovers_and_generates_splits() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "datafiles/healpix=7/b.gzs",
        &encode(&[3, 4], &[1, 2], &[0.3, 0.4], false),
    );
    write(
        dir.path(),
        "datafiles/healpix=12/a.gzs",
        &encode(&[1, 2], &[8, 9], &[0.1, 0.2], false),
    );

    let config = BuilderConfig::for_variant(Variant::Gz10)
        .with_data_dir(dir.path())
        .with_data_files(DataFiles::default());
    let splits = config.split_generators().unwrap();
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].name, "train");

    let split = splits.into_iter().next().unwrap();
    let keys: Vec<String> = collect(config.generate(split.files, None).unwrap())
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    // healpix=12 sorts before healpix=7
    assert_eq!(keys, vec!["1", "2", "3", "4"]);
}
