//! Reclaiming real child processes.

use std::time::Duration;

use h2mpm::lifecycle::{
    ChildExit, ExitClass, ProcessTable, ReclamationSupervisor, SystemProcesses, WorkerTable,
};
use nix::sys::signal::Signal;
use nix::unistd::Pid;

mod common;

fn pid_of(child: &std::process::Child) -> Pid {
    Pid::from_raw(child.id() as i32)
}

#[tokio::test]
async fn terminate_reclaims_sleeping_workers() {
    let children: Vec<_> = (0..3).map(|_| common::spawn_sleeper()).collect();
    let mut table = ProcessTable::new(4);
    for child in &children {
        table.insert(pid_of(child));
    }
    let mut supervisor = ReclamationSupervisor::new(table, SystemProcesses, std::env::temp_dir());

    let started = std::time::Instant::now();
    let report = supervisor.reclaim(true).await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(report.reaped.len(), 3);
    assert!(report.abandoned.is_empty());
    for reaped in &report.reaped {
        assert_eq!(
            reaped.exit,
            ChildExit::Signaled {
                signal: Signal::SIGTERM,
                core_dumped: false
            }
        );
        assert_eq!(reaped.class, ExitClass::Normal);
    }
    assert_eq!(supervisor.workers().max_used(), 0);
}

#[tokio::test]
async fn extra_processes_are_reclaimed_and_unregistered() {
    let child = common::spawn_sleeper();
    let pid = pid_of(&child);
    let mut supervisor =
        ReclamationSupervisor::new(ProcessTable::new(1), SystemProcesses, std::env::temp_dir());
    supervisor.register_extra(pid);

    let report = supervisor.reclaim(true).await;

    assert_eq!(report.reaped.len(), 1);
    assert_eq!(report.reaped[0].pid, pid);
    assert!(supervisor.extras().is_empty());
    assert!(!supervisor.unregister_extra(pid));
}

#[tokio::test]
async fn relieve_classifies_exit_codes() {
    let sick = common::spawn_exiting(7);
    let normal = common::spawn_exiting(0);
    let mut table = ProcessTable::new(2);
    table.insert(pid_of(&sick));
    table.insert(pid_of(&normal));
    let mut supervisor = ReclamationSupervisor::new(table, SystemProcesses, std::env::temp_dir());

    let mut reaped = Vec::new();
    for _ in 0..100 {
        reaped.extend(supervisor.relieve().reaped);
        if reaped.len() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(reaped.len(), 2);
    let class_of = |pid: Pid| reaped.iter().find(|r| r.pid == pid).map(|r| r.class);
    assert_eq!(class_of(pid_of(&sick)), Some(ExitClass::Sick));
    assert_eq!(class_of(pid_of(&normal)), Some(ExitClass::Normal));
    assert_eq!(supervisor.workers().live(), 0);
}
