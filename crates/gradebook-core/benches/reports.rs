use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::codec::{decode, encode, HEADER};
use gradebook_core::{MemoryStorage, RecordStore};

const COURSES: [&str; 6] = ["MCR3U", "ICS3U", "ENG4U", "SPH3U", "SCH3U", "CHC2D"];

fn make_file(students: usize) -> String {
    let mut content = String::from(HEADER);
    content.push('\n');
    for i in 0..students {
        for (c, course) in COURSES.iter().enumerate() {
            let mark = (i * 7 + c * 13) % 101;
            content.push_str(&format!("{},First{i},Last{},{course},{mark}\n", 1000 + i, i % 97));
        }
    }
    content
}

fn bench_codec(c: &mut Criterion) {
    let content = make_file(1_000);
    let students = decode(&content).unwrap();

    c.bench_function("decode_1000_students", |b| {
        b.iter(|| decode(black_box(&content)).unwrap())
    });
    c.bench_function("encode_1000_students", |b| {
        b.iter(|| encode(black_box(&students)))
    });
}

fn bench_reports(c: &mut Criterion) {
    let store = RecordStore::open(MemoryStorage::with_content(&make_file(1_000))).unwrap();

    c.bench_function("report_all", |b| b.iter(|| store.report_all()));
    c.bench_function("report_by_course", |b| {
        b.iter(|| store.report_by_course(black_box("ICS3U")))
    });
    c.bench_function("report_highest_average", |b| {
        b.iter(|| store.report_highest_average())
    });
    c.bench_function("report_top_mark_in_each_course", |b| {
        b.iter(|| store.report_top_mark_in_each_course())
    });
}

criterion_group!(benches, bench_codec, bench_reports);
criterion_main!(benches);
