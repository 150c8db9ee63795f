use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use hashbrown::{HashMap, HashSet};

use raptor_core::model::{
    AccessTable, FrequencyEntry, Mode, Network, TransfersTable, TripPattern, TripSchedule,
};
use raptor_core::routing::raptor::Search;
use raptor_core::Request;

const SERVICE: u32 = 0;

fn linear_scheduled_network(num_stops: usize, trips_per_pattern: usize) -> Network {
    let mut patterns = Vec::new();
    for start in 0..num_stops.saturating_sub(1) {
        let stops = vec![start, start + 1];
        let scheduled_trips = (0..trips_per_pattern)
            .map(|i| {
                let dep = i as i32 * 300;
                TripSchedule {
                    arrivals: vec![dep, dep + 240],
                    departures: vec![dep, dep + 240],
                    service_code: SERVICE,
                    frequency: None,
                }
            })
            .collect();
        patterns.push(TripPattern {
            stops,
            scheduled_trips,
            frequency_trips: Vec::new(),
            mode: Mode::Bus,
            route_index: start,
        });
    }

    let transfers = TransfersTable::from_adjacency(vec![Vec::new(); num_stops]);
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let mut calendar = HashMap::new();
    calendar.insert(date, vec![SERVICE]);
    Network::new(patterns, transfers, num_stops, calendar)
}

fn frequency_network(num_stops: usize) -> Network {
    let mut patterns = Vec::new();
    for start in 0..num_stops.saturating_sub(1) {
        let frequency_trips = vec![TripSchedule {
            arrivals: vec![240, 480],
            departures: vec![0, 240],
            service_code: SERVICE,
            frequency: Some(FrequencyEntry {
                start: 0,
                end: 7200,
                headway_seconds: 300,
            }),
        }];
        patterns.push(TripPattern {
            stops: vec![start, start + 1],
            scheduled_trips: Vec::new(),
            frequency_trips,
            mode: Mode::Bus,
            route_index: start,
        });
    }

    let transfers = TransfersTable::from_adjacency(vec![Vec::new(); num_stops]);
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let mut calendar = HashMap::new();
    calendar.insert(date, vec![SERVICE]);
    Network::new(patterns, transfers, num_stops, calendar)
}

fn base_request(date: NaiveDate) -> Request {
    Request {
        access: AccessTable::from_pairs([(0, 0)]),
        from_time: 0,
        to_time: 1800,
        date,
        max_rides: 4,
        max_trip_duration_minutes: 120,
        max_walk_minutes: 10,
        walk_speed_m_per_s: 1.3,
        transit_modes: HashSet::from([Mode::Bus]),
        monte_carlo_draws_per_minute: 1,
        retain_paths: false,
        seed: 42,
    }
}

fn bench_scheduled_range_search(c: &mut Criterion) {
    let network = linear_scheduled_network(30, 40);
    let request = base_request(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());

    c.bench_function("scheduled_range_search_30stops", |b| {
        b.iter(|| {
            let mut search = Search::new(&network, &request).unwrap();
            search.run()
        });
    });
}

fn bench_frequency_monte_carlo_search(c: &mut Criterion) {
    let network = frequency_network(15);
    let mut request = base_request(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    request.monte_carlo_draws_per_minute = 20;

    c.bench_function("frequency_monte_carlo_search_15stops_20draws", |b| {
        b.iter(|| {
            let mut search = Search::new(&network, &request).unwrap();
            search.run()
        });
    });
}

criterion_group!(benches, bench_scheduled_range_search, bench_frequency_monte_carlo_search);
criterion_main!(benches);
