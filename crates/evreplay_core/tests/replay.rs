//! End-to-end replay tests.

use evreplay_codec::{EventRecord, TimeVal, RECORD_SIZE};
use evreplay_core::{
    replay_files, replay_files_with_clock, Clock, ManualClock, ReplayConfig, ReplayError,
    Replayer, SystemClock,
};
use evreplay_testkit::prelude::*;
use proptest::prelude::*;
use std::io::{self, Write};
use std::time::Duration;

const T0: TimeVal = TimeVal::new(1_000, 0);

fn replay_with_manual_clock(records: &[EventRecord]) -> (Vec<EventRecord>, ManualClock) {
    let clock = ManualClock::new(T0);
    let input = encode_records(records);
    let mut output = Vec::new();
    Replayer::new(&clock).run(&input[..], &mut output).unwrap();
    (decode_records(&output), clock)
}

/// Stamps every write with the real time it happened.
#[derive(Default)]
struct TimedSink {
    emitted_at: Vec<TimeVal>,
    bytes: Vec<u8>,
}

impl Write for TimedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.emitted_at.push(SystemClock.now());
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn example_scenario_is_replayed_on_schedule() {
    let (output, clock) = replay_with_manual_clock(&scenarios::three_events());

    assert_eq!(output.len(), 3);
    assert_eq!(output[0].time, T0);
    assert_eq!(output[1].time, TimeVal::new(1_000, 500_000));
    assert_eq!(output[2].time, TimeVal::new(1_001, 200_000));

    let payloads: Vec<_> = output
        .iter()
        .map(|r| (r.code, r.event_type, r.value))
        .collect();
    assert_eq!(payloads, vec![(1, 1, 1), (2, 1, 0), (1, 1, 0)]);

    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_millis(500), Duration::from_millis(700)]
    );
}

#[test]
fn example_scenario_in_real_time() {
    let records = scenarios::three_events();
    let input = encode_records(&records);
    let mut sink = TimedSink::default();

    let before = SystemClock.now();
    let stats = Replayer::new(SystemClock).run(&input[..], &mut sink).unwrap();
    let after = SystemClock.now();

    assert_eq!(stats.records, 3);
    let output = decode_records(&sink.bytes);
    let epoch = output[0].time;
    assert!(epoch >= before && epoch <= after);

    // Never emitted before the scheduled time.
    for (record, emitted) in output.iter().zip(&sink.emitted_at) {
        assert!(*emitted >= record.time);
    }
    assert!(sink.emitted_at[1] >= epoch + TimeVal::from_micros(500_000));
    assert!(sink.emitted_at[2] >= epoch + TimeVal::from_micros(1_200_000));
}

#[test]
fn truncated_tail_matches_clean_input() {
    let records = scenarios::three_events();

    let mut truncated = encode_records(&records);
    truncated.truncate(truncated.len() - 10);
    let clean = encode_records(&records[..2]);

    let run = |bytes: &[u8]| {
        let clock = ManualClock::new(T0);
        let mut out = Vec::new();
        let stats = Replayer::new(&clock).run(bytes, &mut out).unwrap();
        (out, stats)
    };

    let (out_truncated, stats_truncated) = run(&truncated);
    let (out_clean, stats_clean) = run(&clean);

    assert_eq!(out_truncated, out_clean);
    assert_eq!(out_truncated.len(), 2 * RECORD_SIZE);
    assert_eq!(stats_truncated.trailing_bytes, RECORD_SIZE - 10);
    assert_eq!(stats_clean.trailing_bytes, 0);
}

#[test]
fn empty_input_emits_nothing() {
    let (output, clock) = replay_with_manual_clock(&[]);
    assert!(output.is_empty());
    assert!(clock.sleeps().is_empty());
}

#[test]
fn out_of_order_record_is_emitted_immediately() {
    let records = vec![
        EventRecord::new(TimeVal::new(50, 0), 1, 1, 1),
        EventRecord::new(TimeVal::new(51, 0), 2, 1, 1),
        EventRecord::new(TimeVal::new(50, 500_000), 3, 1, 1),
    ];
    let (output, clock) = replay_with_manual_clock(&records);

    assert_eq!(output.len(), 3);
    // Scheduled in the past relative to the replay, so no extra sleep.
    assert_eq!(output[2].time, TimeVal::new(1_000, 500_000));
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(1)]);
}

#[test]
fn output_replays_again_with_new_epoch() {
    let records = scenarios::key_tap(TimeVal::new(7, 0), 30, 80_000);
    let (first, _) = replay_with_manual_clock(&records);

    let clock = ManualClock::new(TimeVal::new(9_000, 0));
    let mut out = Vec::new();
    Replayer::new(&clock)
        .run(&encode_records(&first)[..], &mut out)
        .unwrap();
    let second = decode_records(&out);

    assert_eq!(second.len(), records.len());
    assert_eq!(second[0].time, TimeVal::new(9_000, 0));
    assert_eq!(second[2].time, TimeVal::new(9_000, 80_000));
    assert_eq!(clock.slept(), Duration::from_millis(80));
}

#[test]
fn replay_files_writes_device_file() {
    let log = TempLog::with_records(&scenarios::three_events());
    let config = ReplayConfig::new(log.input_path(), log.output_path());
    let clock = ManualClock::new(T0);

    let stats = replay_files_with_clock(&config, &clock).unwrap();

    assert_eq!(stats.records, 3);
    assert_eq!(stats.delayed, 2);
    let output = log.output_records();
    assert_eq!(output.len(), 3);
    assert_eq!(output[0].time, T0);
}

#[test]
fn replay_files_truncates_previous_output() {
    let log = TempLog::with_records(&scenarios::three_events()[..1]);
    std::fs::write(log.output_path(), vec![0xaa; 5 * RECORD_SIZE]).unwrap();

    let config = ReplayConfig::new(log.input_path(), log.output_path());
    replay_files_with_clock(&config, ManualClock::new(T0)).unwrap();

    assert_eq!(log.output_bytes().len(), RECORD_SIZE);
}

#[test]
fn missing_input_is_reported_and_output_created() {
    let log = TempLog::new();
    let config = ReplayConfig::new(log.missing_path(), log.output_path());

    let err = replay_files(&config).unwrap_err();

    assert!(matches!(err, ReplayError::OpenInput { .. }));
    assert!(log.output_path().exists());
    assert!(log.output_bytes().is_empty());
}

#[test]
fn unopenable_output_is_reported() {
    let log = TempLog::with_records(&scenarios::three_events());
    let config = ReplayConfig::new(log.input_path(), log.missing_path());

    let err = replay_files(&config).unwrap_err();

    assert!(matches!(err, ReplayError::OpenOutput { .. }));
    assert!(err.to_string().contains("nothing.evlog"));
}

#[test]
fn failing_sink_stops_replay() {
    struct Refuse;

    impl Write for Refuse {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let clock = ManualClock::new(T0);
    let input = encode_records(&scenarios::three_events());
    let mut replayer = Replayer::new(&clock);

    let err = replayer.run(&input[..], Refuse).unwrap_err();

    assert!(matches!(err, ReplayError::Codec(_)));
    assert_eq!(replayer.stats().records, 0);
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn every_record_is_emitted_in_order(recording in recording_strategy(0, 40, 5_000_000)) {
        let (output, _) = replay_with_manual_clock(&recording);

        prop_assert_eq!(output.len(), recording.len());
        for (emitted, original) in output.iter().zip(&recording) {
            prop_assert_eq!(
                (emitted.code, emitted.event_type, emitted.value),
                (original.code, original.event_type, original.value)
            );
        }
    }

    #[test]
    fn recorded_spacing_is_preserved(recording in recording_strategy(1, 40, 5_000_000)) {
        let (output, clock) = replay_with_manual_clock(&recording);

        prop_assert_eq!(output[0].time, T0);
        for (out, rec) in output.windows(2).zip(recording.windows(2)) {
            prop_assert_eq!(out[1].time - out[0].time, rec[1].time - rec[0].time);
        }

        let span = recording[recording.len() - 1].time - recording[0].time;
        prop_assert_eq!(clock.now(), T0 + span);
    }
}
