use std::fs::{self, File};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, PcapBlockOwned, PcapError};
use wpancap_core::{ConversionOptions, ConvertError, Dialect, LinkType, OutputTarget, convert};

const BASE: u64 = 1_500_564_304;

struct Capture {
    linktype: i32,
    records: Vec<(u32, u32, Vec<u8>)>,
}

fn read_capture(path: &Path) -> Capture {
    let file = File::open(path).unwrap();
    let mut reader = LegacyPcapReader::new(65536, file).unwrap();
    let mut linktype = None;
    let mut records = Vec::new();
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                match block {
                    PcapBlockOwned::LegacyHeader(header) => linktype = Some(header.network.0),
                    PcapBlockOwned::Legacy(packet) => {
                        assert_eq!(packet.caplen, packet.origlen);
                        records.push((packet.ts_sec, packet.ts_usec, packet.data.to_vec()));
                    }
                    _ => {}
                }
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete(_)) => reader.refill().unwrap(),
            Err(err) => panic!("unexpected pcap error: {err:?}"),
        }
    }
    Capture {
        linktype: linktype.expect("global header"),
        records,
    }
}

/// One delimited line per `(offset, tag)`, timestamps relative to `BASE`.
fn write_log(dir: &Path, name: &str, frames: &[(u64, u8)]) -> PathBuf {
    let mut text = String::new();
    for (offset, tag) in frames {
        text.push_str(&format!("{}000 41 88 {tag:02x} cd ab\n", BASE + offset));
    }
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn tags(capture: &Capture) -> Vec<u8> {
    capture.records.iter().map(|(_, _, data)| data[2]).collect()
}

#[test]
fn single_file_holds_every_record() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = write_log(input.path(), "a.txt", &[(0, 1), (1, 2), (2, 3)]);
    let output = out.path().join("all.pcap");

    let options = ConversionOptions::new(vec![log], OutputTarget::File(output.clone()));
    let summary = convert(&options).unwrap();

    let capture = read_capture(&output);
    assert_eq!(capture.linktype, 230);
    assert_eq!(tags(&capture), [1, 2, 3]);
    assert_eq!(capture.records[0].0, BASE as u32);
    assert_eq!(capture.records[0].2, [0x41, 0x88, 0x01, 0xcd, 0xab]);
    assert_eq!(summary.records_total, 3);
    assert_eq!(summary.outputs[0].bytes, fs::metadata(&output).unwrap().len());
}

#[test]
fn frame_check_sets_the_link_type() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = write_log(input.path(), "a.txt", &[(0, 1)]);
    let output = out.path().join("fcs.pcap");

    let options = ConversionOptions::new(vec![log], OutputTarget::File(output.clone()))
        .with_link_type(LinkType::from_fcs(true));
    convert(&options).unwrap();

    assert_eq!(read_capture(&output).linktype, 195);
}

#[test]
fn chunks_split_after_the_period_is_exceeded() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = write_log(input.path(), "a.txt", &[(0, 1), (30, 2), (61, 3), (90, 4)]);

    let options = ConversionOptions::new(vec![log], OutputTarget::File(out.path().join("all.pcap")))
        .with_chunk_period(NonZeroU64::new(60));
    let summary = convert(&options).unwrap();

    assert_eq!(
        listing(out.path()),
        ["20170720-152504_all.pcap", "20170720-152634_all.pcap"]
    );
    let first = read_capture(&out.path().join("20170720-152504_all.pcap"));
    let second = read_capture(&out.path().join("20170720-152634_all.pcap"));
    assert_eq!(tags(&first), [1, 2, 3]);
    assert_eq!(tags(&second), [4]);
    assert_eq!(summary.outputs.len(), 2);
    assert_eq!(summary.chunk_period_s, Some(60));
}

#[test]
fn sources_merge_in_order_of_first_timestamp() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let late = write_log(input.path(), "late.txt", &[(100, 1), (101, 2)]);
    let early = write_log(input.path(), "early.txt", &[(50, 3), (51, 4)]);
    let output = out.path().join("all.pcap");

    let options = ConversionOptions::new(vec![late, early], OutputTarget::File(output.clone()));
    let summary = convert(&options).unwrap();

    assert_eq!(tags(&read_capture(&output)), [3, 4, 1, 2]);
    assert!(summary.sources[0].path.ends_with("early.txt"));
}

#[test]
fn equal_first_timestamps_keep_input_order() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let first = write_log(input.path(), "b.txt", &[(0, 1)]);
    let second = write_log(input.path(), "a.txt", &[(0, 2)]);
    let output = out.path().join("all.pcap");

    let options = ConversionOptions::new(vec![first, second], OutputTarget::File(output.clone()));
    convert(&options).unwrap();

    assert_eq!(tags(&read_capture(&output)), [1, 2]);
}

#[test]
fn file_chunks_continue_across_sources() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let a = write_log(input.path(), "a.txt", &[(0, 1), (10, 2)]);
    let b = write_log(input.path(), "b.txt", &[(20, 3)]);

    let options = ConversionOptions::new(
        vec![a, b],
        OutputTarget::File(out.path().join("all.pcap")),
    )
    .with_chunk_period(NonZeroU64::new(3600));
    convert(&options).unwrap();

    assert_eq!(listing(out.path()), ["20170720-152504_all.pcap"]);
    let capture = read_capture(&out.path().join("20170720-152504_all.pcap"));
    assert_eq!(tags(&capture), [1, 2, 3]);
}

#[test]
fn directory_target_writes_one_file_per_source() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let a = write_log(input.path(), "a.txt", &[(0, 1), (1, 2)]);
    let b = write_log(input.path(), "b.log", &[(5, 3)]);

    let options = ConversionOptions::new(
        vec![a, b],
        OutputTarget::Directory(out.path().to_path_buf()),
    );
    let summary = convert(&options).unwrap();

    assert_eq!(listing(out.path()), ["_a.txt_.pcap", "_b.log_.pcap"]);
    assert_eq!(tags(&read_capture(&out.path().join("_a.txt_.pcap"))), [1, 2]);
    assert_eq!(tags(&read_capture(&out.path().join("_b.log_.pcap"))), [3]);
    assert_eq!(summary.outputs.len(), 2);
}

#[test]
fn directory_chunks_close_at_each_source() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let a = write_log(input.path(), "a.txt", &[(0, 1), (10, 2)]);
    let b = write_log(input.path(), "b.txt", &[(20, 3)]);

    let options = ConversionOptions::new(
        vec![a, b],
        OutputTarget::Directory(out.path().to_path_buf()),
    )
    .with_chunk_period(NonZeroU64::new(3600));
    convert(&options).unwrap();

    assert_eq!(
        listing(out.path()),
        ["20170720-152504_a.txt_.pcap", "20170720-152524_b.txt_.pcap"]
    );
}

#[test]
fn directory_sources_sharing_a_basename_share_one_file() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::create_dir(input.path().join("a")).unwrap();
    fs::create_dir(input.path().join("b")).unwrap();
    let a = write_log(&input.path().join("a"), "log.txt", &[(0, 1), (1, 2)]);
    let b = write_log(&input.path().join("b"), "log.txt", &[(5, 3)]);

    let options = ConversionOptions::new(
        vec![a, b],
        OutputTarget::Directory(out.path().to_path_buf()),
    );
    let summary = convert(&options).unwrap();

    assert_eq!(listing(out.path()), ["_log.txt_.pcap"]);
    let capture = read_capture(&out.path().join("_log.txt_.pcap"));
    assert_eq!(tags(&capture), [1, 2, 3]);
    assert_eq!(summary.outputs.len(), 1);
    assert_eq!(summary.outputs[0].records, 3);
    assert_eq!(
        summary.outputs[0].bytes,
        fs::metadata(out.path().join("_log.txt_.pcap")).unwrap().len()
    );
}

#[test]
fn overlapping_sources_append_to_a_reused_chunk_name() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let a = write_log(input.path(), "a.txt", &[(0, 1), (11, 2)]);
    let b = write_log(input.path(), "b.txt", &[(0, 3)]);

    let options = ConversionOptions::new(vec![a, b], OutputTarget::File(out.path().join("m.pcap")))
        .with_chunk_period(NonZeroU64::new(10));
    let summary = convert(&options).unwrap();

    assert_eq!(listing(out.path()), ["20170720-152504_m.pcap"]);
    let capture = read_capture(&out.path().join("20170720-152504_m.pcap"));
    assert_eq!(tags(&capture), [1, 2, 3]);
    assert_eq!(summary.records_total, 3);
    assert_eq!(summary.outputs.len(), 1);
    assert_eq!(summary.outputs[0].records, 3);
}

#[test]
fn unsupported_dialect_aborts_before_output() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let good = write_log(input.path(), "a.txt", &[(0, 1)]);
    let sniffer = input.path().join("capture.psd");
    fs::write(&sniffer, [0u8; 64]).unwrap();

    let options = ConversionOptions::new(
        vec![good, sniffer],
        OutputTarget::Directory(out.path().to_path_buf()),
    );
    let err = convert(&options).unwrap_err();

    assert!(matches!(
        err,
        ConvertError::UnsupportedDialect {
            dialect: Dialect::TiPacketSniffer,
            ..
        }
    ));
    assert!(listing(out.path()).is_empty());
}

#[test]
fn inputs_without_timestamps_are_no_usable_source() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let notes = input.path().join("notes.txt");
    fs::write(&notes, "capture started on channel 11\nnothing to see here\n").unwrap();

    let options = ConversionOptions::new(
        vec![notes],
        OutputTarget::Directory(out.path().to_path_buf()),
    );
    let err = convert(&options).unwrap_err();

    assert!(matches!(err, ConvertError::NoUsableSource { inputs: 1 }));
    assert!(listing(out.path()).is_empty());
}

#[test]
fn sources_without_frames_are_an_empty_result() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = input.path().join("bad_hex.txt");
    fs::write(&log, "1500564304000 zz yy xx\n1500564305000 qq rr ss\n").unwrap();

    let options = ConversionOptions::new(
        vec![log],
        OutputTarget::File(out.path().join("all.pcap")),
    );
    let err = convert(&options).unwrap_err();

    assert!(matches!(err, ConvertError::EmptyResult { sources: 1 }));
    assert!(listing(out.path()).is_empty());
}

#[test]
fn sources_without_timestamps_are_dropped_and_reported() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let good = write_log(input.path(), "a.txt", &[(0, 1)]);
    let notes = input.path().join("notes.txt");
    fs::write(&notes, "capture started on channel 11\n").unwrap();

    let options = ConversionOptions::new(
        vec![notes, good],
        OutputTarget::Directory(out.path().to_path_buf()),
    );
    let summary = convert(&options).unwrap();

    assert_eq!(summary.sources.len(), 1);
    assert_eq!(summary.dropped_sources.len(), 1);
    assert!(summary.dropped_sources[0].ends_with("notes.txt"));
    assert_eq!(listing(out.path()), ["_a.txt_.pcap"]);
}

#[test]
fn missing_input_is_an_io_error() {
    let out = tempfile::tempdir().unwrap();
    let options = ConversionOptions::new(
        vec![PathBuf::from("does/not/exist.txt")],
        OutputTarget::File(out.path().join("all.pcap")),
    );
    assert!(matches!(convert(&options), Err(ConvertError::Io { .. })));
}

#[test]
fn summary_serializes_to_json() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = write_log(input.path(), "a.txt", &[(0, 1)]);

    let options = ConversionOptions::new(
        vec![log],
        OutputTarget::File(out.path().join("all.pcap")),
    );
    let summary = convert(&options).unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["tool"]["name"], "wpancap");
    assert_eq!(value["link_type"], "ieee802154_no_fcs");
    assert_eq!(value["sources"][0]["dialect"], "plain_hex");
    assert_eq!(value["outputs"][0]["time_start"], "2017-07-20T15:25:04Z");
    assert!(value.get("chunk_period_s").is_none());
}
