use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

struct Artist {
    firstname: &'static str,
    lastname: &'static str,
    nationality: &'static str,
    gender: &'static str,
    birth: i64,
    death: i64,
    /// Relative weight: how often the artist exhibits.
    weight: u64,
}

const ARTISTS: &[Artist] = &[
    Artist { firstname: "Claude", lastname: "Monet", nationality: "FR", gender: "Male", birth: 1840, death: 1926, weight: 9 },
    Artist { firstname: "Edgar", lastname: "Degas", nationality: "FR", gender: "Male", birth: 1834, death: 1917, weight: 7 },
    Artist { firstname: "Berthe", lastname: "Morisot", nationality: "FR", gender: "Female", birth: 1841, death: 1895, weight: 4 },
    Artist { firstname: "Camille", lastname: "Pissarro", nationality: "FR", gender: "Male", birth: 1830, death: 1903, weight: 6 },
    Artist { firstname: "Lucien", lastname: "Pissarro", nationality: "FR", gender: "Male", birth: 1863, death: 1944, weight: 3 },
    Artist { firstname: "Wassily", lastname: "Kandinsky", nationality: "RU", gender: "Male", birth: 1866, death: 1944, weight: 8 },
    Artist { firstname: "Gabriele", lastname: "Münter", nationality: "DE", gender: "Female", birth: 1877, death: 1962, weight: 5 },
    Artist { firstname: "Edvard", lastname: "Munch", nationality: "NO", gender: "Male", birth: 1863, death: 1944, weight: 6 },
    Artist { firstname: "Mary", lastname: "Cassatt", nationality: "US", gender: "Female", birth: 1844, death: 1926, weight: 4 },
    Artist { firstname: "Paul", lastname: "Signac", nationality: "FR", gender: "Male", birth: 1863, death: 1935, weight: 5 },
    Artist { firstname: "Natalia", lastname: "Goncharova", nationality: "RU", gender: "Female", birth: 1881, death: 1962, weight: 3 },
    Artist { firstname: "Egon", lastname: "Schiele", nationality: "AT", gender: "Male", birth: 1890, death: 1918, weight: 2 },
];

const VENUES: &[(&str, &str)] = &[
    ("FR", "Paris"),
    ("FR", "Lyon"),
    ("DE", "Berlin"),
    ("DE", "Munich"),
    ("AT", "Vienna"),
    ("NL", "Amsterdam"),
    ("GB", "London"),
    ("RU", "Moscow"),
    ("US", "New York"),
];

/// One output row, column names matching what the explorer expects.
#[derive(Serialize)]
struct Row {
    firstname: &'static str,
    lastname: &'static str,
    nationality: &'static str,
    gender: &'static str,
    status_at_exhibition: &'static str,
    age_at_exhibition: i64,
    startdate: i64,
    country: &'static str,
    city: &'static str,
    eid: i64,
    paintings: i64,
}

fn generate(rng: &mut SimpleRng, exhibitions: i64) -> Vec<Row> {
    let total_weight: u64 = ARTISTS.iter().map(|a| a.weight).sum();
    let mut rows = Vec::new();

    for eid in 0..exhibitions {
        let year = 1880 + rng.below(31) as i64;
        let &(country, city) = rng.pick(VENUES);
        let n_artists = 1 + rng.below(6);

        for _ in 0..n_artists {
            let mut ticket = rng.below(total_weight);
            let artist = ARTISTS
                .iter()
                .find(|a| {
                    if ticket < a.weight {
                        true
                    } else {
                        ticket -= a.weight;
                        false
                    }
                })
                .unwrap_or(&ARTISTS[0]);
            if year < artist.birth + 15 {
                continue;
            }
            rows.push(Row {
                firstname: artist.firstname,
                lastname: artist.lastname,
                nationality: artist.nationality,
                gender: artist.gender,
                status_at_exhibition: if year <= artist.death { "Alive" } else { "Dead" },
                age_at_exhibition: year - artist.birth,
                startdate: year,
                country,
                city,
                eid,
                paintings: 1 + rng.below(12) as i64,
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let text = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Row) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, ArrayRef)> = vec![
        ("firstname", text(|r| r.firstname)),
        ("lastname", text(|r| r.lastname)),
        ("nationality", text(|r| r.nationality)),
        ("gender", text(|r| r.gender)),
        ("status_at_exhibition", text(|r| r.status_at_exhibition)),
        ("age_at_exhibition", int(|r| r.age_at_exhibition)),
        ("startdate", int(|r| r.startdate)),
        ("country", text(|r| r.country)),
        ("city", text(|r| r.city)),
        ("eid", int(|r| r.eid)),
        ("paintings", int(|r| r.paintings)),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| {
                let dtype: DataType = array.data_type().clone();
                Field::new(*name, dtype, false)
            })
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 400);

    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;
    write_csv(&dir.join("data.csv"), &rows)?;
    write_parquet(&dir.join("data.parquet"), &rows)?;

    println!("Wrote {} exhibition records to data/data.csv and data/data.parquet", rows.len());
    Ok(())
}
