// Gzip transport coverage:
//
// * `GzipSink` / `GzipSource` transparency
// * interop with plain flate2 gzip streams
// * corrupt input vs. IO failure classification

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read, Write};

    use flate2::{read::GzDecoder, write::GzEncoder, Compression};
    use recordio_core::{
        compression::{GzipSink, GzipSource, GZIP_MAGIC},
        config::{ReaderOptions, WriterOptions},
        recordio::{RecordReader, RecordWriter},
        types::RecordIoError,
    };

    fn sample_data() -> Vec<u8> {
        (0..50_000u32).map(|i| (i % 251) as u8 ^ (i / 7) as u8).collect()
    }

    fn compress(chunks: &[&[u8]]) -> Vec<u8> {
        let mut sink = GzipSink::new(Vec::new());
        for chunk in chunks {
            sink.write_all(chunk).unwrap();
        }
        sink.finish().unwrap()
    }

    fn decompress(wire: &[u8]) -> Result<Vec<u8>, RecordIoError> {
        let mut out = Vec::new();
        GzipSource::new(wire).read_to_end(&mut out)?;
        Ok(out)
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

// # ✅ 1. Transparency

    #[test]
    fn single_chunk_roundtrip() {
        let data = sample_data();
        let wire = compress(&[&data]);
        assert_eq!(&wire[..2], &GZIP_MAGIC);
        assert_eq!(decompress(&wire).unwrap(), data);
    }

    #[test]
    fn seven_byte_chunks_roundtrip() {
        let data = sample_data();
        let chunks: Vec<&[u8]> = data.chunks(7).collect();
        let wire = compress(&chunks);
        assert_eq!(decompress(&wire).unwrap(), data);
    }

    #[test]
    fn empty_stream_roundtrip() {
        let wire = compress(&[]);
        assert!(decompress(&wire).unwrap().is_empty());
    }

    #[test]
    fn tiny_blocks_still_reassemble() {
        let data = sample_data();
        let wire = compress(&[&data]);

        let mut out = Vec::new();
        GzipSource::with_block_size(&wire[..], 3).read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn sink_counts_uncompressed_input() {
        let mut sink = GzipSink::with_level(Vec::new(), 9);
        sink.write_all(b"abc").unwrap();
        sink.write_all(b"defg").unwrap();
        assert_eq!(sink.bytes_in(), 7);
    }

// # ✅ 2. Chunked reads

    #[test]
    fn read_chunk_is_exact_until_finished() {
        let data: Vec<u8> = (0..100u8).collect();
        let wire = compress(&[&data]);
        let mut source = GzipSource::new(&wire[..]);

        let first = source.read_chunk(10).unwrap();
        assert_eq!(&first[..], &data[..10]);

        let rest = source.read_chunk(200).unwrap();
        assert_eq!(&rest[..], &data[10..]);
        assert!(source.is_finished());

        assert!(source.read_chunk(5).unwrap().is_empty());
        assert_eq!(source.buffered(), 0);
    }

    #[test]
    fn into_inner_returns_remaining_source() {
        let wire = compress(&[b"payload"]);
        let mut source = GzipSource::new(io::Cursor::new(wire.clone()));
        assert_eq!(&source.read_chunk(64).unwrap()[..], b"payload");
        assert_eq!(source.compressed_bytes_in(), wire.len() as u64);
        let cursor = source.into_inner();
        assert_eq!(cursor.position(), wire.len() as u64);
    }

// # ✅ 3. Interop with stock gzip streams

    #[test]
    fn sink_output_decodes_with_flate2() {
        let data = sample_data();
        let wire = compress(&[&data]);

        let mut out = Vec::new();
        GzDecoder::new(&wire[..]).read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn source_decodes_flate2_output() {
        let data = sample_data();
        let mut enc = GzEncoder::new(Vec::new(), Compression::best());
        enc.write_all(&data).unwrap();
        let wire = enc.finish().unwrap();

        assert_eq!(decompress(&wire).unwrap(), data);
    }

// # ❌ 4. Corruption and IO failures

    #[test]
    fn garbage_header_is_a_decompression_error() {
        let err = decompress(b"definitely not a gzip stream").unwrap_err();
        assert!(matches!(err, RecordIoError::Decompression(_)), "got {:?}", err);
    }

    #[test]
    fn checksum_mismatch_is_a_decompression_error() {
        let mut wire = compress(&[&sample_data()]);
        let crc_at = wire.len() - 8;
        wire[crc_at] ^= 0xff;

        let err = decompress(&wire).unwrap_err();
        assert!(matches!(err, RecordIoError::Decompression(_)), "got {:?}", err);
    }

    #[test]
    fn cut_off_stream_is_a_decompression_error() {
        let wire = compress(&[&sample_data()]);
        // Mid-deflate, missing trailer, and a single deflate byte after the header.
        for cut in [wire.len() / 2, wire.len() - 4, 11] {
            let err = decompress(&wire[..cut]).unwrap_err();
            assert!(
                matches!(err, RecordIoError::Decompression(_)),
                "cut at {} of {}: got {:?}",
                cut,
                wire.len(),
                err
            );
        }
    }

    #[test]
    fn cut_off_stream_fails_record_reader() {
        let data = sample_data();
        let mut writer =
            RecordWriter::new(Vec::new(), &WriterOptions::compressed(true)).unwrap();
        for record in data.chunks(1000) {
            writer.write(record).unwrap();
        }
        let wire = writer.finish().unwrap();

        for cut in [wire.len() / 2, 11] {
            let mut reader =
                RecordReader::new(Cursor::new(wire[..cut].to_vec()), &ReaderOptions::compressed(true)).unwrap();
            let outcome = loop {
                match reader.read() {
                    Ok(Some(_)) => continue,
                    other => break other,
                }
            };
            assert!(
                matches!(outcome, Err(RecordIoError::Decompression(_))),
                "cut at {} of {}: got {:?}",
                cut,
                wire.len(),
                outcome
            );
        }
    }

    #[test]
    fn source_io_errors_pass_through() {
        let err = decompress_from(FailingReader).unwrap_err();
        match err {
            RecordIoError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::Other),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    fn decompress_from<R: Read>(inner: R) -> Result<Vec<u8>, RecordIoError> {
        let mut out = Vec::new();
        GzipSource::new(inner).read_to_end(&mut out)?;
        Ok(out)
    }
}
