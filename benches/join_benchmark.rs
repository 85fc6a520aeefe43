use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pantry_logistics::filter::filter_by_date;
use pantry_logistics::index::build_index;
use pantry_logistics::join::{JoinColumns, LogisticsJoiner};
use pantry_logistics::layout::{RequestLayout, SupplierLayout, VolunteerLayout};
use pantry_logistics::types::{CellValue, Row};
use pantry_logistics::{DateWindow, DATA_NOT_FOUND};

fn columns() -> JoinColumns {
    JoinColumns {
        requests: RequestLayout::default().resolve().unwrap(),
        chef_signups: SupplierLayout::chef_signups().resolve().unwrap(),
        recurring_chefs: SupplierLayout::recurring_chefs().resolve().unwrap(),
        volunteers: VolunteerLayout::default().resolve().unwrap(),
    }
}

fn grid(size: usize, width: usize, fill: impl Fn(usize, &mut Vec<CellValue>)) -> Vec<Row> {
    (0..size)
        .map(|i| {
            let mut cells = vec![CellValue::Empty; width];
            fill(i, &mut cells);
            Row::new(i, cells)
        })
        .collect()
}

fn benchmark_join(c: &mut Criterion) {
    let now = DateTime::parse_from_rfc3339("2024-05-01T14:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let window = DateWindow::current(now, 4).unwrap();
    let cols = columns();

    let mut group = c.benchmark_group("join");
    group.sample_size(10);

    for size in [100, 1000, 10000].iter() {
        // Every other request falls inside the window
        let requests = grid(*size, 41, |i, cells| {
            let offset = chrono::Duration::hours(if i % 2 == 0 { 12 } else { 36 });
            cells[cols.requests.id] = CellValue::from(format!("R{}", i));
            cells[cols.requests.date] = CellValue::DateTime((window.start + offset).with_timezone(&window.offset));
            cells[cols.requests.intersection] = CellValue::from("Main & King");
        });
        let signups = grid(*size / 2, 16, |i, cells| {
            cells[cols.chef_signups.request_id] = CellValue::from(format!("R{}", i * 2));
            cells[cols.chef_signups.date] = CellValue::DateTime(window.start_civil());
            cells[cols.chef_signups.contact] = CellValue::from(format!("Chef {}", i % 50));
            cells[cols.chef_signups.pickup_time] = CellValue::from("10:00");
        });
        let volunteers = grid(50, 7, |i, cells| {
            cells[cols.volunteers.contact] = CellValue::from(format!("Chef {}", i));
            cells[cols.volunteers.intersection] = CellValue::from("Queen & Spadina");
        });

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let requests = build_index(
                    &filter_by_date(&requests, cols.requests.date, &window),
                    cols.requests.id,
                );
                let signups = build_index(
                    &filter_by_date(&signups, cols.chef_signups.date, &window),
                    cols.chef_signups.request_id,
                );
                let volunteers = build_index(&volunteers, cols.volunteers.contact);
                let joiner = LogisticsJoiner::new(cols, &window, DATA_NOT_FOUND, "Toronto");
                black_box(joiner.join(&requests, &signups, &Default::default(), &volunteers))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_join);
criterion_main!(benches);
