mod util;
use util::*;

static INIT: std::sync::Once = std::sync::Once::new();

// cargo test --test stream --features=test -- --nocapture
#[cfg(feature = "test")]
#[test]
fn write_then_read() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};

    const TEST: &str = "write_then_read";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "abcde-")?;
    println!("{}", stream.file_id());
    assert_eq!(stream.write(b"ABCDE")?, 5);
    stream.close();

    let mut reader = stream.open_reader()?;
    let mut buf = [0u8; 16];
    let n = reader.read(&mut buf)?;
    assert_eq!(&buf[..n], b"ABCDE");
    assert!(matches!(reader.read(&mut buf), Err(FileErr::StreamEnded)));
    // and it stays ended
    assert!(matches!(reader.read(&mut buf), Err(FileErr::StreamEnded)));
    assert_eq!(reader.offset(), 5);

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn round_trip() -> anyhow::Result<()> {
    use sea_logstream_file::LogStream;

    const TEST: &str = "round_trip";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "round-trip-")?;
    let bytes = random_bytes(4068);
    stream.write(&bytes)?;
    stream.close();

    // one byte at a time
    let mut reader = stream.open_reader()?;
    let mut read = Vec::new();
    let mut byte = [0u8; 1];
    while let Ok(n) = reader.read(&mut byte) {
        assert_eq!(n, 1);
        read.push(byte[0]);
    }
    assert_eq!(read, bytes);

    let mut read = Vec::new();
    assert_eq!(stream.open_reader()?.read_to_end(&mut read)?, bytes.len());
    assert_eq!(read, bytes);

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn close_is_idempotent() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};

    const TEST: &str = "close_is_idempotent";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "close-")?;
    let handle = stream.handle();
    stream.write(b"hello")?;
    assert!(!handle.is_closed());
    stream.close();
    stream.close();
    assert!(stream.is_closed());
    assert!(handle.is_closed());

    assert!(matches!(stream.write(b"world"), Err(FileErr::StreamClosed)));
    assert_eq!(std::fs::read(stream.file_id().path())?, b"hello");

    let mut read = Vec::new();
    handle.open_reader()?.read_to_end(&mut read)?;
    assert_eq!(read, b"hello");

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn blocking_read() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};
    use std::{thread, time::Duration};

    const TEST: &str = "blocking_read";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "blocking-")?;
    let mut reader = stream.open_reader()?;

    let waiter = thread::spawn(move || {
        let mut buf = [0u8; 8];
        let n = reader.read(&mut buf).unwrap();
        let first = buf[..n].to_vec();
        let end = reader.read(&mut buf);
        (first, end)
    });

    thread::sleep(Duration::from_millis(100));
    stream.write(b"X")?;
    thread::sleep(Duration::from_millis(100));
    stream.close();

    let (first, end) = waiter.join().unwrap();
    assert_eq!(first, b"X");
    assert!(matches!(end, Err(FileErr::StreamEnded)));

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn late_reader() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};
    use std::time::{Duration, Instant};

    const TEST: &str = "late_reader";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "late-")?;
    for i in 0..10u8 {
        stream.write(&[i; 100])?;
    }
    stream.close();

    let start = Instant::now();
    let mut reader = stream.open_reader()?;
    let mut buf = vec![0u8; 4096];
    let mut total = 0;
    loop {
        match reader.read(&mut buf) {
            Ok(n) => total += n,
            Err(FileErr::StreamEnded) => break,
            Err(e) => return Err(e.into()),
        }
    }
    assert_eq!(total, 1000);
    assert!(start.elapsed() < Duration::from_secs(1));

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn bytes_before_end() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};

    const TEST: &str = "bytes_before_end";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "priority-")?;
    let mut reader = stream.open_reader()?;
    stream.write(b"tail")?;
    stream.close();

    // the stream is closed and the file is at its end after this read,
    // but the bytes come first
    let mut buf = [0u8; 4];
    assert_eq!(reader.read(&mut buf)?, 4);
    assert_eq!(&buf, b"tail");
    assert!(matches!(reader.read(&mut buf), Err(FileErr::StreamEnded)));

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn read_timeout() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};
    use std::{
        thread,
        time::{Duration, Instant},
    };

    const TEST: &str = "read_timeout";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "timeout-")?;
    let mut reader = stream.open_reader()?;
    let mut buf = [0u8; 8];

    let start = Instant::now();
    assert!(matches!(
        reader.read_timeout(&mut buf, Duration::from_millis(50)),
        Err(FileErr::Timeout)
    ));
    assert!(start.elapsed() >= Duration::from_millis(50));

    // available data beats an expired deadline
    stream.write(b"abc")?;
    assert_eq!(reader.read_deadline(&mut buf, Instant::now())?, 3);

    let mut late = stream.open_reader()?;
    let handle = thread::spawn(move || {
        let mut buf = [0u8; 8];
        let n = late.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"abc");
        late.read_timeout(&mut buf, Duration::from_secs(10))
    });
    thread::sleep(Duration::from_millis(50));
    let start = Instant::now();
    stream.close();
    assert!(matches!(handle.join().unwrap(), Err(FileErr::StreamEnded)));
    assert!(start.elapsed() < Duration::from_secs(10));

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn read_timeout_unbounded() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};
    use std::{thread, time::Duration};

    const TEST: &str = "read_timeout_unbounded";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "unbounded-")?;
    let mut reader = stream.open_reader()?;

    // a timeout beyond what `Instant` can hold means no deadline at all
    let waiter = thread::spawn(move || {
        let mut buf = [0u8; 8];
        let n = reader.read_timeout(&mut buf, Duration::MAX).unwrap();
        let first = buf[..n].to_vec();
        (first, reader.read_timeout(&mut buf, Duration::MAX))
    });
    thread::sleep(Duration::from_millis(50));
    stream.write(b"later")?;
    stream.close();

    let (first, end) = waiter.join().unwrap();
    assert_eq!(first, b"later");
    assert!(matches!(end, Err(FileErr::StreamEnded)));

    let mut closed = stream.open_reader()?;
    let mut buf = [0u8; 8];
    assert_eq!(closed.read_timeout(&mut buf, Duration::MAX)?, 5);
    assert!(matches!(
        closed.read_timeout(&mut buf, Duration::MAX),
        Err(FileErr::StreamEnded)
    ));

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn multiple_readers() -> anyhow::Result<()> {
    use sea_logstream_file::LogStream;
    use std::{thread, time::Duration};

    const TEST: &str = "multiple_readers";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "concurrent-")?;
    let handle = stream.handle();

    let writer = thread::spawn(move || {
        let mut written = Vec::new();
        for _ in 0..10 {
            let bytes = random_bytes(1024);
            stream.write(&bytes).unwrap();
            written.extend_from_slice(&bytes);
            thread::sleep(Duration::from_millis(20));
        }
        stream.close();
        written
    });

    // staggered, so that some start before and some after the writer is done
    let mut readers = Vec::new();
    for _ in 0..10 {
        thread::sleep(Duration::from_millis(30));
        let mut reader = handle.open_reader()?;
        readers.push(thread::spawn(move || {
            let mut read = Vec::new();
            reader.read_to_end(&mut read).unwrap();
            read
        }));
    }

    let written = writer.join().unwrap();
    assert_eq!(written.len(), 10 * 1024);
    for reader in readers {
        assert_eq!(reader.join().unwrap(), written);
    }

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn lockstep() -> anyhow::Result<()> {
    use sea_logstream_file::{export::flume::bounded, FileErr, LogStream};
    use std::thread;

    const TEST: &str = "lockstep";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "sync-")?;
    let mut reader = stream.open_reader()?;
    let (done, ack) = bounded(0);

    let reader = thread::spawn(move || {
        let mut read = Vec::new();
        let mut buf = vec![0u8; 2048];
        loop {
            match reader.read(&mut buf) {
                Ok(n) => read.extend_from_slice(&buf[..n]),
                Err(FileErr::StreamEnded) => break,
                Err(e) => panic!("{e}"),
            }
            if read.len() % 1024 == 0 {
                done.send(()).unwrap();
            }
        }
        read
    });

    // every append is read before the next one
    let mut written = Vec::new();
    for _ in 0..10 {
        let bytes = random_bytes(1024);
        stream.write(&bytes)?;
        written.extend_from_slice(&bytes);
        ack.recv()?;
    }
    stream.close();

    assert_eq!(reader.join().unwrap(), written);

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn drop_closes() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream, LogStreamOptions};
    use std::{path::Path, thread, time::Duration};

    const TEST: &str = "drop_closes";
    INIT.call_once(env_logger::init);

    let mut options = LogStreamOptions::new(temp_dir(TEST)?, "drop-");
    options.set_remove_on_drop(true).set_sync_on_write(true);
    let mut stream = LogStream::create_with(options)?;
    let handle = stream.handle();
    let mut reader = stream.open_reader()?;

    let waiter = thread::spawn(move || {
        let mut read = Vec::new();
        let res = reader.read_to_end(&mut read);
        (res.is_ok(), read)
    });

    stream.write(b"bye")?;
    thread::sleep(Duration::from_millis(50));
    let path = stream.file_id().path().to_owned();
    drop(stream);

    let (ok, read) = waiter.join().unwrap();
    assert!(ok);
    assert_eq!(read, b"bye");

    assert!(!Path::new(&path).exists());
    assert!(handle.is_closed());
    assert!(matches!(handle.open_reader(), Err(FileErr::IoError(_))));

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn io_traits() -> anyhow::Result<()> {
    use sea_logstream_file::LogStream;
    use std::{
        io::{BufRead, BufReader, Write},
        thread,
    };

    const TEST: &str = "io_traits";
    INIT.call_once(env_logger::init);

    let mut stream = LogStream::create(temp_dir(TEST)?, "lines-")?;
    let reader = BufReader::new(stream.open_reader()?);

    let lines = thread::spawn(move || {
        reader
            .lines()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    });

    for i in 0..5 {
        writeln!(stream, "line {i}")?;
    }
    stream.flush()?;
    stream.close();

    assert_eq!(
        lines.join().unwrap(),
        (0..5).map(|i| format!("line {i}")).collect::<Vec<_>>()
    );

    Ok(())
}

#[cfg(feature = "test")]
#[test]
fn create_fails() -> anyhow::Result<()> {
    use sea_logstream_file::{FileErr, LogStream};

    INIT.call_once(env_logger::init);

    let res = LogStream::create("/this/dir/does/not/exist", "nope-");
    assert!(matches!(res, Err(FileErr::IoError(_))));

    Ok(())
}
