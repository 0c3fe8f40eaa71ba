use crate::cli::ShellArgs;
use crate::lookup::{resolve_query, QueryError};
use crate::report::{render_chart, risk_chart, write_result, ChartView};
use crate::store::{spawn_load, DataStore, LoadEvent};
use crate::utils::{sanitize_file_stem, Result};
use crossbeam_channel::{unbounded, Receiver};
use std::{
    io::{self, BufRead, Write},
    path::Path,
    sync::Arc,
};

const PROMPT: &str = "gene or SNP> ";

pub fn shell(args: ShellArgs) -> Result<()> {
    let store = Arc::new(DataStore::new());
    let (sender_event, receiver_event) = unbounded();
    let loader_thread = spawn_load(Arc::clone(&store), args.data.clone(), sender_event)
        .map_err(|e| format!("Failed to start loader thread: {}", e))?;

    let session = Session {
        store: &store,
        events: receiver_event,
        chart_dir: args.chart_dir.as_deref(),
    };
    let num_queries = session
        .run(io::stdin().lock(), io::stdout().lock())
        .map_err(|e| e.to_string())?;
    log::debug!("Session ended after {} queries", num_queries);

    // A slow download must not hold up exit
    if loader_thread.is_finished() && loader_thread.join().is_err() {
        log::error!("Loader thread panicked");
    }
    Ok(())
}

struct Session<'a> {
    store: &'a DataStore,
    events: Receiver<LoadEvent>,
    chart_dir: Option<&'a Path>,
}

impl Session<'_> {
    fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> io::Result<usize> {
        let mut num_queries = 0;
        loop {
            self.report_load_events(&mut out)?;
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            let command = line.trim();
            if command.eq_ignore_ascii_case("quit") || command.eq_ignore_ascii_case("exit") {
                break;
            }

            self.report_load_events(&mut out)?;
            self.answer(&line, &mut out)?;
            num_queries += 1;
        }
        Ok(num_queries)
    }

    fn report_load_events<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for event in self.events.try_iter() {
            if let LoadEvent::Failed(message) = event {
                writeln!(out, "{}", message)?;
            }
        }
        Ok(())
    }

    fn answer<W: Write>(&self, line: &str, out: &mut W) -> io::Result<()> {
        let result = match resolve_query(line, self.store) {
            Ok(result) => result,
            Err(err) => {
                if let (QueryError::DataUnavailable, Some(reason)) = (&err, self.store.failure()) {
                    log::debug!("Data unavailable after failed load: {}", reason);
                }
                return writeln!(out, "{}", err);
            }
        };
        write_result(out, &result)?;

        match self.chart_dir {
            Some(chart_dir) => {
                let file_name = format!("{}.svg", sanitize_file_stem(&result.resolved_gene_name));
                let chart_path = chart_dir.join(file_name);
                match render_chart(&result, &chart_path) {
                    Ok(Some(placeholder)) => writeln!(out, "{}", placeholder)?,
                    Ok(None) => writeln!(out, "Chart written to {}", chart_path.display())?,
                    Err(err) => {
                        log::warn!("Chart rendering failed: {}", err);
                        writeln!(out, "Chart could not be rendered: {}", err)?
                    }
                }
            }
            None => {
                if let ChartView::Placeholder(placeholder) = risk_chart(&result) {
                    writeln!(out, "{}", placeholder)?;
                }
            }
        }
        writeln!(out)
    }
}
