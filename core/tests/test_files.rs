// File-backed streams:
//
// * `open_writer` / `open_reader` on both transports
// * append mode
// * normalized `InputSource` / `OutputSink`

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Read;

    use bytes::Bytes;
    use flate2::read::GzDecoder;
    use recordio_core::{
        config::{ReaderOptions, WriterOptions},
        constants::TERMINATOR_WIRE,
        recordio::{open_reader, open_writer, InputSource, OutputSink, StreamReader, StreamWriter},
        types::RecordIoError,
    };
    use tempfile::tempdir;

    fn collect(mut reader: StreamReader) -> Vec<Bytes> {
        let out = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        reader.close().unwrap();
        out
    }

// # ✅ 1. Caller-facing API

    #[test]
    fn raw_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.rio");

        let mut writer = open_writer(&path, false).unwrap();
        writer.write(b"first").unwrap();
        writer.write(b"").unwrap();
        writer.write(b"third").unwrap();
        writer.close().unwrap();

        let on_disk = fs::read(&path).unwrap();
        assert!(on_disk.ends_with(&TERMINATOR_WIRE));

        let records = collect(open_reader(&path, false).unwrap());
        assert_eq!(records, vec![
            Bytes::from_static(b"first"),
            Bytes::new(),
            Bytes::from_static(b"third"),
        ]);
    }

    #[test]
    fn compressed_file_roundtrip_and_is_plain_gzip() {
        let dir = tempdir().unwrap();
        let raw_path = dir.path().join("plain.rio");
        let gz_path = dir.path().join("packed.rio.gz");

        for (path, compressed) in [(&raw_path, false), (&gz_path, true)] {
            let mut writer = open_writer(path, compressed).unwrap();
            for i in 0..500u32 {
                writer.write(format!("record-{i}").as_bytes()).unwrap();
            }
            writer.close().unwrap();
        }

        // A gzip tool sees exactly the raw stream.
        let mut inflated = Vec::new();
        GzDecoder::new(fs::File::open(&gz_path).unwrap()).read_to_end(&mut inflated).unwrap();
        assert_eq!(inflated, fs::read(&raw_path).unwrap());

        let records = collect(open_reader(&gz_path, true).unwrap());
        assert_eq!(records.len(), 500);
        assert_eq!(&records[499][..], b"record-499");
    }

    #[test]
    fn dropped_file_writer_leaves_a_valid_stream() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dropped.rio.gz");
        {
            let mut writer = open_writer(&path, true).unwrap();
            writer.write(b"survives").unwrap();
        }
        assert_eq!(collect(open_reader(&path, true).unwrap()), vec![Bytes::from_static(b"survives")]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        match open_reader(dir.path().join("nope.rio"), false) {
            Err(RecordIoError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            Err(other) => panic!("expected Io, got {:?}", other),
            Ok(_) => panic!("expected an error"),
        }
    }

// # ✅ 2. Append

    #[test]
    fn append_continues_a_closed_stream() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.rio");

        let mut writer = open_writer(&path, false).unwrap();
        writer.write(b"a").unwrap();
        writer.write(b"b").unwrap();
        writer.close().unwrap();

        let options = WriterOptions::default().with_append(true);
        let mut writer = StreamWriter::create(&path, &options).unwrap();
        writer.write(b"c").unwrap();
        writer.close().unwrap();

        let expected = [1, b'a', 1, b'b', 1, b'c', 0xff, 0xff, 0xff, 0xff, 0x0f];
        assert_eq!(fs::read(&path).unwrap(), expected);
        assert_eq!(collect(open_reader(&path, false).unwrap()).len(), 3);
    }

    #[test]
    fn append_creates_a_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.rio");

        let options = WriterOptions::default().with_append(true);
        let mut writer = StreamWriter::create(&path, &options).unwrap();
        writer.write(b"x").unwrap();
        writer.close().unwrap();

        assert_eq!(collect(open_reader(&path, false).unwrap()), vec![Bytes::from_static(b"x")]);
    }

    #[test]
    fn append_refuses_unterminated_files() {
        let dir = tempdir().unwrap();
        let options = WriterOptions::default().with_append(true);

        let short = dir.path().join("short.rio");
        fs::write(&short, [1, b'a']).unwrap();
        assert!(matches!(
            StreamWriter::create(&short, &options),
            Err(RecordIoError::MissingTerminator)
        ));

        let unterminated = dir.path().join("unterminated.rio");
        fs::write(&unterminated, [5, b'h', b'e', b'l', b'l', b'o']).unwrap();
        assert!(matches!(
            StreamWriter::create(&unterminated, &options),
            Err(RecordIoError::MissingTerminator)
        ));
        assert_eq!(fs::read(&unterminated).unwrap().len(), 6);
    }

    #[test]
    fn append_refuses_payload_that_looks_like_a_terminator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lookalike.rio");
        // One 6-byte record whose payload ends in the terminator bytes, no terminator.
        let original = [6, b'A', 0xff, 0xff, 0xff, 0xff, 0x0f];
        fs::write(&path, original).unwrap();

        let options = WriterOptions::default().with_append(true);
        assert!(matches!(
            StreamWriter::create(&path, &options),
            Err(RecordIoError::MissingTerminator)
        ));
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn append_refuses_bytes_after_the_terminator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trailing.rio");
        let original = [1, b'a', 0xff, 0xff, 0xff, 0xff, 0x0f, 1, b'b', 0xff, 0xff, 0xff, 0xff];
        fs::write(&path, original).unwrap();

        let options = WriterOptions::default().with_append(true);
        assert!(matches!(
            StreamWriter::create(&path, &options),
            Err(RecordIoError::MissingTerminator)
        ));
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn append_walks_records_that_contain_terminator_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("embedded.rio");

        let mut writer = open_writer(&path, false).unwrap();
        writer.write(&TERMINATOR_WIRE).unwrap();
        writer.close().unwrap();

        let options = WriterOptions::default().with_append(true);
        let mut writer = StreamWriter::create(&path, &options).unwrap();
        writer.write(b"next").unwrap();
        writer.close().unwrap();

        assert_eq!(collect(open_reader(&path, false).unwrap()), vec![
            Bytes::copy_from_slice(&TERMINATOR_WIRE),
            Bytes::from_static(b"next"),
        ]);
    }

    #[test]
    fn append_is_raw_only() {
        let dir = tempdir().unwrap();
        let options = WriterOptions::compressed(true).with_append(true);
        assert!(matches!(
            StreamWriter::create(dir.path().join("x.rio.gz"), &options),
            Err(RecordIoError::InvalidConfig(_))
        ));
    }

// # ✅ 3. Normalized sources and sinks

    #[test]
    fn memory_input_source() {
        let wire = vec![2, b'h', b'i', 0xff, 0xff, 0xff, 0xff, 0x0f];
        let reader = StreamReader::open(InputSource::Memory(wire), &ReaderOptions::default()).unwrap();
        assert_eq!(collect(reader), vec![Bytes::from_static(b"hi")]);
    }

    #[test]
    fn boxed_writer_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("boxed.rio");
        let file = fs::File::create(&path).unwrap();

        let mut writer = StreamWriter::open(OutputSink::Writer(Box::new(file)), &WriterOptions::default()).unwrap();
        writer.write(b"boxed").unwrap();
        writer.close().unwrap();

        let reader = StreamReader::open(
            InputSource::Reader(Box::new(fs::File::open(&path).unwrap())),
            &ReaderOptions::default(),
        )
        .unwrap();
        assert_eq!(collect(reader), vec![Bytes::from_static(b"boxed")]);
    }

    #[test]
    fn boxed_writer_sink_cannot_append() {
        let options = WriterOptions::default().with_append(true);
        assert!(matches!(
            StreamWriter::open(OutputSink::Writer(Box::new(Vec::<u8>::new())), &options),
            Err(RecordIoError::InvalidConfig(_))
        ));
    }
}
