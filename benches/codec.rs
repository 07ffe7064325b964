use std::time::{Duration, Instant};

use udcode::{UdcBuilder, UdcReader};

const ITERATIONS: u32 = 20;

fn payload(len: usize) -> Vec<u8> {
    // Half text, half noise so compression has something to do
    let text = b"The quick brown fox jumps over the lazy dog. ";
    (0..len)
        .map(|i| if i % 2 == 0 { text[i % text.len()] } else { (i * 2654435761usize >> 13) as u8 })
        .collect()
}

fn time<F: FnMut()>(mut f: F) -> Duration {
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        f();
    }
    start.elapsed() / ITERATIONS
}

fn main() {
    println!("Running udcode codec benchmarks");
    println!("===============================\n");

    let cell_w = 12;
    let divider = "-".repeat(6 * (cell_w + 2) + 1);
    println!("{divider}");
    let mut header = String::from("| ");
    for c in ["Size", "Compress", "Grid", "Pixels", "Encode", "Decode"] {
        header.push_str(&format!("{c:<cell_w$}| "));
    }
    println!("{header}");
    println!("{divider}");

    for len in [64, 1024, 16 * 1024, 128 * 1024] {
        let data = payload(len);
        for compress in [false, true] {
            let grid = UdcBuilder::new(&data).compress(compress).build().unwrap();
            let img = grid.to_image();

            let enc = time(|| {
                let _ = UdcBuilder::new(&data).compress(compress).build().unwrap().to_image();
            });
            let dec = time(|| {
                let decoded = UdcReader::read(&img).unwrap();
                assert_eq!(decoded.data().len(), data.len());
            });

            let row = [
                format!("{len}"),
                format!("{compress}"),
                format!("{}", grid.size()),
                format!("{}", img.width()),
                format!("{enc:.2?}"),
                format!("{dec:.2?}"),
            ];
            let mut line = String::from("| ");
            for cell in row {
                line.push_str(&format!("{cell:<cell_w$}| "));
            }
            println!("{line}");
        }
    }
    println!("{divider}");
}
