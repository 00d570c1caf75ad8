//! Copy stdin into a `LogStream`, while a number of readers tail it concurrently.
//! Reader 0 echoes to stdout; every reader reports how many bytes it got.
use anyhow::{anyhow, Result};
use clap::Parser;
use sea_logstream_file::{export::flume::unbounded, LogStream, LogStreamOptions, DEFAULT_PREFIX};
use std::{io, path::PathBuf, thread};

#[derive(Debug, Parser)]
struct Args {
    #[clap(long, help = "Create the stream file here; defaults to the temp dir")]
    dir: Option<PathBuf>,
    #[clap(long, help = "File name prefix", default_value = DEFAULT_PREFIX)]
    prefix: String,
    #[clap(long, help = "Number of tailing readers", default_value_t = 1)]
    readers: usize,
    #[clap(long, help = "Remove the stream file on exit")]
    remove: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        dir,
        prefix,
        readers,
        remove,
    } = Args::parse();
    let mut options = LogStreamOptions::new(dir.unwrap_or_default(), &prefix);
    options.set_remove_on_drop(remove);
    let mut stream = LogStream::create_with(options)?;
    log::info!("Streaming stdin to {}", stream.file_id().path());

    let (sender, receiver) = unbounded();
    let mut handles = Vec::new();
    for i in 0..readers {
        // opened here, so that they exist before the file could be removed
        let mut reader = stream.open_reader()?;
        let sender = sender.clone();
        handles.push(thread::spawn(move || -> io::Result<()> {
            let total = if i == 0 {
                io::copy(&mut reader, &mut io::stdout().lock())?
            } else {
                io::copy(&mut reader, &mut io::sink())?
            };
            sender.send((i, total)).ok();
            Ok(())
        }));
    }
    std::mem::drop(sender);

    let written = io::copy(&mut io::stdin().lock(), &mut stream);
    stream.close();
    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("reader thread panicked"))??;
    }
    let written = written?;

    eprintln!("{}: {} bytes", stream.file_id().path(), written);
    while let Ok((i, total)) = receiver.recv() {
        eprintln!("reader {i}: {total} bytes");
    }

    Ok(())
}
