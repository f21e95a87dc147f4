use std::io::{BufReader, Write};

use plotgrid::{
    BlockReader, Config, Dataset, Mode, OutputKind, PlotError, Point, ReadOptions, cli, open_input,
    plot,
};
use tempfile::NamedTempFile;

fn read_all(text: &str, opts: ReadOptions) -> Dataset {
    BlockReader::new(text.as_bytes(), opts)
        .next_block()
        .unwrap()
        .dataset
}

fn render(cfg: &Config, text: &str) -> String {
    let ds = read_all(text, cfg.read_options());
    String::from_utf8(plot(&ds, cfg).unwrap()).unwrap()
}

#[test]
fn ascii_grid_from_text() {
    let cfg = Config::builder(OutputKind::Ascii).build().unwrap();
    let out = render(&cfg, "1 2 3\n4 5 6\n7 8 9\n");
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("    x: [0 - 2]    y: [0 - 9] -- 0: #, 1: @, 2: *")
    );
    let body: Vec<&str> = lines.collect();
    assert_eq!(body.len(), 40);
    for marker in ['#', '@', '*'] {
        let n: usize = body.iter().map(|l| l.matches(marker).count()).sum();
        assert_eq!(n, 3, "marker {marker}");
    }
}

#[test]
fn single_value_renders_one_marker() {
    for output in [OutputKind::Ascii, OutputKind::Svg] {
        let cfg = Config::builder(output).axis(false).build().unwrap();
        let out = render(&cfg, "42\n");
        let marks = match output {
            OutputKind::Svg => out.matches("<circle").count(),
            _ => out.lines().skip(1).map(|l| l.matches('#').count()).sum(),
        };
        assert_eq!(marks, 1, "{output:?}");
    }
}

#[test]
fn braille_lines_are_braille() {
    let cfg = Config::builder(OutputKind::Braille).build().unwrap();
    let out = render(&cfg, "1\n4\n9\n16\n25\n");
    let body: Vec<&str> = out.lines().skip(1).collect();
    assert_eq!(body.len(), 10);
    for line in body {
        assert_eq!(line.chars().count(), 36);
        assert!(line.chars().all(|c| ('\u{2800}'..='\u{28ff}').contains(&c)));
    }
}

#[test]
fn svg_line_mode_with_x_column_and_regression() {
    let cfg = Config::builder(OutputKind::Svg)
        .mode(Mode::Line)
        .axis(false)
        .x_column(true)
        .regression(true)
        .build()
        .unwrap();
    let out = render(
        &cfg,
        "1000,1000,1850\n1010,1010,1870\n1020,1020,\n1030,1035,1900\n1040,1080,1925\n",
    );
    assert!(out.starts_with("<svg "));
    assert!(out.ends_with("</svg>\n"));
    // second column breaks at the empty cell
    assert_eq!(out.matches("<polyline").count(), 3);
    assert_eq!(out.matches("stroke-width=\"2\" stroke-dasharray=\"2,5\" />").count(), 2);
}

#[test]
fn flip_swaps_axes() {
    let opts = ReadOptions {
        flip_xy: true,
        ..ReadOptions::default()
    };
    let ds = read_all("5\n6\n", opts);
    assert_eq!(ds.column(0)[1], Point::new(6.0, 1.0));
}

#[test]
fn log_scale_rejects_non_positive() {
    let cfg = Config::builder(OutputKind::Svg).log_x(true).build().unwrap();
    let ds = read_all("3\n4\n", cfg.read_options());
    // row index 0 cannot be logged
    assert!(matches!(plot(&ds, &cfg), Err(PlotError::LogDomain(v)) if v == 0.0));
}

#[test]
fn file_input_streams_blocks() {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "# comment\n1\t2\n3\t4\n\n5\t6\n").unwrap();
    f.flush().unwrap();

    let cfg = Config::builder(OutputKind::Ascii).dims(20, 8).build().unwrap();
    let input = open_input(f.path().to_str()).unwrap();
    let mut out = Vec::new();
    cli::stream(&cfg, input, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    let headers = out.lines().filter(|l| l.starts_with("    x: ")).count();
    assert_eq!(headers, 2);
    assert_eq!(out.lines().count(), 2 * 9 + 1);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let err = open_input(path.to_str()).map(|_| ()).unwrap_err();
    assert!(matches!(err, PlotError::Io(_)));
}

#[test]
fn buffered_reader_input() {
    let data = b"1,2\n3,4\n".to_vec();
    let mut rdr = BlockReader::new(BufReader::new(&data[..]), ReadOptions::default());
    let block = rdr.next_block().unwrap();
    assert!(block.end_of_stream);
    assert_eq!(block.dataset.rows(), 2);
    assert_eq!(block.dataset.column_count(), 2);
}
