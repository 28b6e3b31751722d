use std::sync::{Condvar, Mutex};

/*
The Baton
=========

A two-party rendezvous between one conductor and one chorister, built on a
single boolean under a single lock.

Vocabulary
----------

  pending     The one piece of shared state. `true` means a request has
              been posted and not yet acknowledged; `false` means the last
              request (if any) was completed.

  signal      Conductor side. Posts a request and blocks until the
              chorister acknowledges it.

  acknowledge Chorister side. Clears `pending` (completing the conductor's
              in-flight `signal`) and immediately waits for the next
              request. One combined operation under one lock acquisition.

  release     Shutdown side. Posts a request without waiting, so a parked
              chorister wakes up and can notice the cleared running flag.


The Exchange
------------

    Conductor                         Chorister
    ─────────                         ─────────
                                      await_signal()      ── parks
    signal():
      pending = true
      notify ─────────────────────→   wakes, returns
      wait while pending
                                      ... writes the note ...
                                      acknowledge_and_wait():
                                        pending = false
      wakes, returns   ←───────────     notify
                                        wait while !pending ── parks
    signal():  (next note)
      ...

Both sides mutate `pending` and test their wait condition under the same
lock, and every wait sits in a re-testing loop, so a spurious wakeup is
re-checked and a posted request cannot be lost. At most one side is ever
blocked on the condvar at a time: the conductor waits only while `pending`
is true, the chorister only while it is false.

Why the first park is different
-------------------------------

A chorister may reach the rendezvous after the conductor has already
posted a request. If its first act were to clear `pending` (acknowledging
work it never did), that `signal` would return with nothing played. The
first park therefore only waits (`await_signal`), and an acknowledge is
issued strictly after each serviced request, never before the first one.

Shutdown
--------

`force_release` posts a request and returns immediately. The woken
chorister re-checks the shared running flag before doing anything, so a
release with the flag cleared ends the thread instead of playing a note.
The conductor only ever releases parked choristers (the song has fully
drained by then), so no chorister is interrupted mid-write.
*/

/// The rendezvous primitive: one request flag, one lock, one condvar.
pub struct Baton {
    pending: Mutex<bool>,
    turned: Condvar,
}

impl Baton {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(false),
            turned: Condvar::new(),
        }
    }

    /// Conductor-only: post a request and block until the chorister has
    /// acknowledged it, which it does only after finishing the work.
    pub fn signal(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending = true;
        self.turned.notify_one();
        while *pending {
            pending = self.turned.wait(pending).unwrap();
        }
    }

    /// Chorister-only, first park: wait for a request without touching the
    /// flag.
    pub fn await_signal(&self) {
        let mut pending = self.pending.lock().unwrap();
        while !*pending {
            pending = self.turned.wait(pending).unwrap();
        }
    }

    /// Chorister-only: acknowledge the request just serviced, then wait
    /// for the next one.
    pub fn acknowledge_and_wait(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending = false;
        self.turned.notify_one();
        while !*pending {
            pending = self.turned.wait(pending).unwrap();
        }
    }

    /// Shutdown-only: post a request and return without waiting for any
    /// acknowledgment.
    pub fn force_release(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending = true;
        self.turned.notify_one();
    }
}

impl Default for Baton {
    fn default() -> Self {
        Self::new()
    }
}
