//! Write a small synthetic catalog in the healpix layout and read it back

use std::{fs, path::Path, time::Instant};

use gz10::{generate_examples, BuilderConfig, ObjectId, ShardEncoder, Variant};

const ROOT: &str = "gz10_demo";
const ROWS_PER_SHARD: usize = 50;

fn write_shard(path: &Path, first_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let ids: Vec<i64> = (0..ROWS_PER_SHARD as i64)
        .rev()
        .map(|i| first_id + i * 3)
        .collect();
    let labels: Vec<u8> = (0..ROWS_PER_SHARD).map(|i| (i % 10) as u8).collect();
    let redshift: Vec<f32> = (0..ROWS_PER_SHARD).map(|i| 0.01 + i as f32 * 0.002).collect();
    let pixels: Vec<u8> = (0..ROWS_PER_SHARD * 16 * 16 * 3).map(|i| (i % 256) as u8).collect();
    let pxscale = vec![0.262f32; ROWS_PER_SHARD];

    let mut encoder = ShardEncoder::new();
    encoder
        .add_column("object_id", &[], &ids)?
        .add_column("ans", &[], &labels)?
        .add_column("redshift", &[], &redshift)?
        .add_column("images", &[16, 16, 3], &pixels)?
        .add_column("pxscale", &[], &pxscale)?;

    fs::create_dir_all(path.parent().ok_or("shard path has no parent")?)?;
    fs::write(path, encoder.finish()?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Writing synthetic catalog under '{ROOT}'...");
    for (bucket, first_id) in [(1103, 1_000), (1187, 5_000), (2044, 9_000)] {
        let path = Path::new(ROOT).join(format!("datafiles/healpix={bucket}/001-of-001.gzs"));
        write_shard(&path, first_id)?;
        println!("  {}", path.display());
    }

    let config = BuilderConfig::for_variant(Variant::Gz10RgbImages).with_data_dir(ROOT);
    let splits = config.split_generators()?;

    for split in splits {
        println!("Split '{}': {} shards", split.name, split.files.len());

        let start = Instant::now();
        let count = config
            .generate(split.files.clone(), None)?
            .filter(Result::is_ok)
            .count();
        println!("  {count} records in {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);

        // One requested id per shard, plus one that does not exist
        let ids = vec![
            vec![ObjectId::Int(1_003), ObjectId::Int(1_001)],
            vec![ObjectId::from("5000")],
            vec![ObjectId::Int(9_147)],
        ];
        for example in generate_examples(split.files, Some(ids), Variant::Gz10RgbImages)? {
            match example {
                Ok((key, record)) => {
                    let image = record.rgb_image().ok_or("record has no image")?;
                    println!(
                        "  {key}: label {} redshift {:.3} image {}x{}x{}",
                        record.gz10_label(),
                        record.redshift(),
                        image.height,
                        image.width,
                        image.channels
                    );
                }
                Err(err) => println!("  skipped: {err}"),
            }
        }
    }

    Ok(())
}
