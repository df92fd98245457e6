use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use exhibition_explorer::data::filter::{FilterState, Selection};
use exhibition_explorer::data::loader::load_file;
use exhibition_explorer::data::model::{Gender, Status};
use exhibition_explorer::session::{ScatterModel, Session};
use parquet::arrow::ArrowWriter;

const HEADER: &str = "firstname,lastname,nationality,gender,status_at_exhibition,\
age_at_exhibition,startdate,country,city,eid,paintings";

fn csv_file(rows: &[&str]) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(file)
}

#[test]
fn test_load_filter_select_round() -> Result<()> {
    let file = csv_file(&[
        "Claude,Monet,FR,Male,Alive,65,1905,FR,Paris,1,3",
        "Claude,Monet,FR,Male,Alive,65,1905,DE,Berlin,2,2",
        "Claude,Monet,FR,Male,Alive,66,1906,FR,Paris,3,",
        "Berthe,Morisot,FR,Female,Dead,50,1891,FR,Paris,4,5",
        "Edvard,Munch,NO,Male,Alive,9,1872,NO,Oslo,5,1",
    ])?;
    let session = Session::new(load_file(file.path())?);
    assert_eq!(
        session.dataset().nationalities,
        vec!["FR".to_string(), "NO".to_string()]
    );

    let filters = FilterState {
        nationality: Selection::Only("FR".into()),
        status: Selection::Only(Status::Alive),
        gender: Selection::Only(Gender::Male),
        max_age: "70".into(),
    };
    let model = session.apply_filters(&filters)?;
    assert_eq!(model.filtered_count, 3);
    assert_eq!(model.stats.paintings, 5);
    assert_eq!(model.stats.countries, 2);
    assert_eq!(model.stats.cities, 2);
    assert_eq!(model.stats.exhibitions, 3);

    let ScatterModel::Chart(chart) = &model.scatter else {
        panic!("expected scatter chart");
    };
    assert_eq!(chart.artists.len(), 1);
    assert_eq!(chart.artists[0].artist, "Claude Monet");
    assert_eq!(chart.year_extent, Some((1905, 1906)));

    let mark_1905 = chart
        .marks
        .iter()
        .find(|m| m.year == 1905)
        .expect("1905 mark");
    assert_eq!(mark_1905.exhibitions, 2);
    assert_eq!(mark_1905.paintings, 5);

    let bar = session.select_mark(mark_1905);
    assert_eq!(bar.title, "Claude Monet (1905)");
    let pairs: Vec<(&str, usize)> = bar.bars.iter().map(|b| (b.country.as_str(), b.count)).collect();
    assert_eq!(pairs, vec![("FR", 1), ("DE", 1)]);
    assert_eq!(bar.axis.ticks, vec![0, 1]);

    Ok(())
}

#[test]
fn test_numeric_age_regression() -> Result<()> {
    let file = csv_file(&[
        "A,A,FR,Male,Alive,5,1900,FR,Paris,1,1",
        "B,B,FR,Male,Alive,9,1900,FR,Paris,2,1",
        "C,C,FR,Male,Alive,21,1900,FR,Paris,3,1",
    ])?;
    let session = Session::new(load_file(file.path())?);
    let filters = FilterState {
        max_age: "10".into(),
        ..FilterState::default()
    };
    let model = session.apply_filters(&filters)?;
    assert_eq!(model.filtered_count, 2);

    let ScatterModel::Chart(chart) = &model.scatter else {
        panic!("expected scatter chart");
    };
    let names: Vec<&str> = chart.artists.iter().map(|a| a.artist.as_str()).collect();
    assert_eq!(names, vec!["A A", "B B"]);
    Ok(())
}

#[test]
fn test_non_numeric_year_does_not_crash() -> Result<()> {
    let file = csv_file(&[
        "A,B,FR,Male,Alive,30,unknown,FR,Paris,1,1",
        "A,B,FR,Male,Alive,30,1900,FR,Paris,2,1",
    ])?;
    let session = Session::new(load_file(file.path())?);
    let model = session.apply_filters(&FilterState::default())?;

    let ScatterModel::Chart(chart) = &model.scatter else {
        panic!("expected scatter chart");
    };
    assert_eq!(chart.artists[0].count, 2);
    assert_eq!(chart.marks.len(), 1);
    assert_eq!(chart.year_extent, Some((1900, 1900)));
    Ok(())
}

#[test]
fn test_empty_result_is_no_data() -> Result<()> {
    let file = csv_file(&["A,B,FR,Male,Alive,30,1900,FR,Paris,1,1"])?;
    let session = Session::new(load_file(file.path())?);
    let filters = FilterState {
        gender: Selection::Only(Gender::Female),
        ..FilterState::default()
    };
    let model = session.apply_filters(&filters)?;
    assert_eq!(model.scatter, ScatterModel::NoData);
    Ok(())
}

#[test]
fn test_parquet_with_integer_columns() -> Result<()> {
    let text = |v: &[&str]| -> ArrayRef { Arc::new(StringArray::from(v.to_vec())) };
    let int = |v: &[i64]| -> ArrayRef { Arc::new(Int64Array::from(v.to_vec())) };

    let columns: Vec<(&str, ArrayRef)> = vec![
        ("firstname", text(&["Paul", "Paul"])),
        ("lastname", text(&["Signac", "Signac"])),
        ("nationality", text(&["FR", "FR"])),
        ("gender", text(&["Male", "Male"])),
        ("status_at_exhibition", text(&["Alive", "Alive"])),
        ("age_at_exhibition", int(&[40, 41])),
        ("startdate", int(&[1903, 1904])),
        ("country", text(&["FR", "NL"])),
        ("city", text(&["Paris", "Amsterdam"])),
        ("eid", int(&[10, 11])),
        ("paintings", int(&[4, 6])),
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
    )?;

    let file = tempfile::Builder::new().suffix(".parquet").tempfile()?;
    let mut writer = ArrowWriter::try_new(file.reopen()?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    let dataset = load_file(file.path())?;
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[1].startdate, Some(1904));
    assert_eq!(dataset.records[1].eid, "11");
    assert_eq!(dataset.records[0].age_at_exhibition, Some(40.0));
    assert_eq!(dataset.records[0].paintings, 4);
    Ok(())
}
