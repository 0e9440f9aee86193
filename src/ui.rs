use crate::azkar::progress;
use crate::models::AppData;
use chrono::NaiveDate;
use html_escape::encode_text;

pub fn render_index(date: NaiveDate, data: &AppData) -> String {
    let pointer = &data.daily_verse_state;
    let verse_label = match data.chapter(pointer.chapter_id) {
        Some(chapter) => format!("{} {}:{}", chapter.name_simple, chapter.id, pointer.verse_number),
        None => format!("{}:{}", pointer.chapter_id, pointer.verse_number),
    };

    let values = [
        ("HEADER_AR", encode_text(&data.header_arabic_title).into_owned()),
        ("HEADER_EN", encode_text(&data.header_english_title).into_owned()),
        ("NAME", encode_text(&data.user.name).into_owned()),
        ("LOCATION", encode_text(&data.user.location).into_owned()),
        ("DATE", date.format("%A, %d %B %Y").to_string()),
        ("MISBAHA", data.misbaha.count.to_string()),
        ("ZIKR", encode_text(&data.misbaha.custom_zikr).into_owned()),
        ("AZKAR", azkar_rows(data)),
        ("VERSE", encode_text(&verse_label).into_owned()),
    ];
    fill(INDEX_HTML, &values)
}

/// Substitutes `{{KEY}}` placeholders in one pass, so substituted text is
/// never scanned again. Unknown keys are left as they are.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            values
                .iter()
                .find(|(key, _)| *key == &after[..end])
                .map(|(_, value)| (end, value))
        });
        match value {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn azkar_rows(data: &AppData) -> String {
    progress(&data.azkar)
        .into_iter()
        .map(|row| {
            format!(
                r#"<li data-category="{}" class="{}"><span>{}</span><span>{}/{}</span></li>"#,
                row.category.key(),
                if row.complete { "done" } else { "" },
                row.arabic,
                row.completed,
                row.total
            )
        })
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Werd</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Amiri:wght@400;700&family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg-1: #f3efe4;
      --bg-2: #cfe3d4;
      --ink: #22302a;
      --accent: #2f7a57;
      --accent-2: #b0843c;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(34, 48, 42, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef4ea 60%, #f7f4ec 100%);
      color: var(--ink);
      font-family: "Amiri", "Space Grotesk", serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      gap: 12px;
      flex-wrap: wrap;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5b6660;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(34, 48, 42, 0.08);
      display: grid;
      gap: 10px;
      align-content: start;
    }

    .label {
      font-family: "Space Grotesk", sans-serif;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      font-size: 0.75rem;
      color: #7a847e;
    }

    .value {
      font-size: 1.8rem;
      font-weight: 700;
    }

    .verse-text {
      font-size: 1.4rem;
      line-height: 2;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    li {
      display: flex;
      justify-content: space-between;
    }

    li.done {
      color: var(--accent);
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.secondary {
      background: #e7ece8;
      color: var(--ink);
    }

    .row {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.95rem;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>{{HEADER_AR}}</h1>
        <p class="subtitle">{{HEADER_EN}}</p>
      </div>
      <div>
        <p>السلام عليكم، <strong id="name">{{NAME}}</strong></p>
        <p class="subtitle"><span id="date">{{DATE}}</span> · <span id="hijri"></span></p>
      </div>
    </header>

    <section class="grid">
      <div class="card">
        <span class="label">Misbaha</span>
        <span id="zikr">{{ZIKR}}</span>
        <span id="misbaha" class="value">{{MISBAHA}}</span>
        <div class="row">
          <button id="misbaha-inc" type="button">+1</button>
          <button id="misbaha-save" class="secondary" type="button">حفظ</button>
          <button id="misbaha-reset" class="secondary" type="button">تصفير</button>
        </div>
      </div>

      <div class="card">
        <span class="label">Azkar</span>
        <ul id="azkar">{{AZKAR}}</ul>
      </div>

      <div class="card">
        <span class="label">Prayer · <span id="location">{{LOCATION}}</span></span>
        <span id="next-prayer" class="value">-</span>
        <span id="countdown" class="subtitle"></span>
      </div>
    </section>

    <section class="card">
      <span class="label">Verse of the day · <span id="verse-key">{{VERSE}}</span></span>
      <p id="verse-text" class="verse-text"></p>
      <p id="verse-translation" class="subtitle"></p>
      <div class="row">
        <button id="verse-play" type="button">استماع</button>
        <button id="surah-play" class="secondary" type="button">تلاوة السورة</button>
        <button id="audio-stop" class="secondary" type="button">إيقاف</button>
      </div>
    </section>

    <section class="card">
      <span class="label">Hadith</span>
      <p id="hadith" class="verse-text"></p>
    </section>

    <p id="status" class="status" role="status"></p>
    <audio id="player" hidden></audio>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const player = document.getElementById('player');
    let verseAudio = null;
    let verseChapter = null;
    let verseNumber = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type;
    };

    const api = async (path, options = {}) => {
      const res = await fetch(path, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        let message = `Request failed (${res.status})`;
        try {
          message = (await res.json()).error || message;
        } catch (_) {}
        throw new Error(message);
      }
      return res.status === 204 ? null : res.json();
    };

    const renderMisbaha = (misbaha) => {
      document.getElementById('misbaha').textContent = misbaha.count;
      document.getElementById('zikr').textContent = misbaha.zikr;
    };

    const syncAudio = async (status) => {
      if (!status.current_url) {
        player.pause();
        player.removeAttribute('src');
        return;
      }
      if (player.getAttribute('src') !== status.current_url) {
        player.src = status.current_url;
      }
      try {
        await player.play();
      } catch (err) {
        syncAudio(await api('/api/audio/failed', { method: 'POST' }));
        setStatus('تعذر تشغيل الصوت', 'error');
      }
    };

    player.addEventListener('ended', async () => {
      syncAudio(await api('/api/audio/ended', { method: 'POST' }));
    });

    const loadVerse = async () => {
      const body = await api('/api/daily-verse');
      const verse = body.verse || {};
      verseChapter = body.pointer.chapterId;
      verseNumber = body.pointer.verseNumber;
      document.getElementById('verse-key').textContent = verse.verse_key || `${verseChapter}:${verseNumber}`;
      document.getElementById('verse-text').textContent = verse.text_uthmani || '';
      const translation = (verse.translations || [])[0];
      document.getElementById('verse-translation').innerHTML = translation ? translation.text : '';
      verseAudio = verse.audio && verse.audio.url ? `https://verses.quran.com/${verse.audio.url}` : null;
    };

    const loadPrayer = async () => {
      const body = await api('/api/prayer-times');
      document.getElementById('next-prayer').textContent = `${body.next.arabic} ${body.next.time_12h || body.next.time}`;
      document.getElementById('countdown').textContent = body.schedule.countdown;
    };

    const loadCalendar = async () => {
      const body = await api('/api/calendar');
      document.getElementById('hijri').textContent = body.hijriLabel || '';
    };

    const loadHadith = async () => {
      const body = await api('/api/hadiths/daily');
      const hadith = body.hadiths[0];
      document.getElementById('hadith').textContent = hadith ? (hadith.hadithArabic || hadith.hadithEnglish || '') : '';
    };

    document.getElementById('misbaha-inc').addEventListener('click', () => {
      api('/api/misbaha/increment', { method: 'POST' }).then(renderMisbaha).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('misbaha-reset').addEventListener('click', () => {
      api('/api/misbaha/reset', { method: 'POST' }).then(renderMisbaha).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('misbaha-save').addEventListener('click', async () => {
      try {
        await api('/api/misbaha/sessions', { method: 'POST' });
        renderMisbaha(await api('/api/misbaha'));
        setStatus('تم الحفظ', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('verse-play').addEventListener('click', async () => {
      if (!verseAudio) {
        setStatus('لا يوجد صوت لهذه الآية', 'error');
        return;
      }
      const status = await api('/api/audio/single', {
        method: 'POST',
        body: JSON.stringify({ verse: verseNumber, url: verseAudio })
      });
      syncAudio(status).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('surah-play').addEventListener('click', async () => {
      try {
        const status = await api('/api/audio/sequence', {
          method: 'POST',
          body: JSON.stringify({ surah: verseChapter })
        });
        await syncAudio(status);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('audio-stop').addEventListener('click', async () => {
      syncAudio(await api('/api/audio/stop', { method: 'POST' }));
    });

    [loadVerse, loadPrayer, loadCalendar, loadHadith].forEach((load) => {
      load().catch((err) => setStatus(err.message, 'error'));
    });
  </script>
</body>
</html>
"#;
