//! Shared UI constants such as colors, sizing, and bridge scripts.

use crate::core::scene::{Color, QualityTier};

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_DEFAULT: &str = "#27272a";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_LIVE: &str = "#ef4444";

pub const TIMELINE_HEIGHT: f64 = 120.0;
pub const TIMELINE_CANVAS_ID: &str = "timeline-canvas";
pub const VIDEO_ELEMENT_ID: &str = "player-video";

// Timeline scene palette. Every layer has its own colour so the rasterizer
// and tests can tell layers apart.
pub const TIMELINE_BACKGROUND: Color = Color::rgb(0x1a, 0x1a, 0x1a);
pub const TIMELINE_BUFFERED: Color = Color::rgba(66, 133, 244, 0.3);
pub const TIMELINE_TICK: Color = Color::rgb(0x71, 0x71, 0x7a);
pub const TIMELINE_PLAYHEAD: Color = Color::rgb(255, 0, 0);
pub const TIMELINE_LIVE_BADGE: Color = Color::rgba(255, 0, 0, 0.7);
pub const TIMELINE_LIVE_TEXT: Color = Color::rgb(255, 255, 255);

/// Simulated rendition stack, lowest first.
pub const TIMELINE_QUALITY_TIERS: [QualityTier; 4] = [
    QualityTier { name: "240p", height: 20.0, color: Color::rgba(52, 168, 83, 0.5) },
    QualityTier { name: "360p", height: 30.0, color: Color::rgba(251, 188, 5, 0.5) },
    QualityTier { name: "480p", height: 40.0, color: Color::rgba(234, 67, 53, 0.5) },
    QualityTier { name: "720p", height: 50.0, color: Color::rgba(66, 133, 244, 0.5) },
];

/// Replays a serialized `Scene` onto the timeline canvas and reports the
/// canvas size (CSS pixels plus device pixel ratio) back to Rust.
pub const TIMELINE_CANVAS_SCRIPT: &str = r#"
const canvasId = "timeline-canvas";
let last = null;

function getCanvas() {
    const canvas = document.getElementById(canvasId);
    return canvas ? { canvas, ctx: canvas.getContext("2d") } : { canvas: null, ctx: null };
}

function sendSize() {
    const { canvas } = getCanvas();
    if (!canvas) {
        return;
    }
    const rect = canvas.getBoundingClientRect();
    const next = { width: rect.width, height: rect.height, dpr: window.devicePixelRatio || 1 };
    if (last &&
        Math.abs(last.width - next.width) < 0.5 &&
        Math.abs(last.height - next.height) < 0.5 &&
        Math.abs(last.dpr - next.dpr) < 0.01) {
        return;
    }
    last = next;
    dioxus.send(next);
}

function attach() {
    const { canvas } = getCanvas();
    if (!canvas) {
        setTimeout(attach, 100);
        return;
    }
    const observer = new ResizeObserver(() => sendSize());
    observer.observe(canvas);
    window.addEventListener("resize", sendSize, { passive: true });
    sendSize();
}

function draw(scene) {
    const { canvas, ctx } = getCanvas();
    if (!canvas || !ctx) {
        return;
    }
    const dpr = scene.pixel_ratio || 1;
    const backingWidth = Math.round(scene.width * dpr);
    const backingHeight = Math.round(scene.height * dpr);
    if (canvas.width !== backingWidth || canvas.height !== backingHeight) {
        canvas.width = backingWidth;
        canvas.height = backingHeight;
    }
    ctx.setTransform(dpr, 0, 0, dpr, 0, 0);
    ctx.clearRect(0, 0, scene.width, scene.height);
    for (const cmd of scene.commands) {
        ctx.fillStyle = cmd.color;
        if (cmd.op === "fill_rect") {
            ctx.fillRect(cmd.x, cmd.y, cmd.width, cmd.height);
        } else if (cmd.op === "fill_circle") {
            ctx.beginPath();
            ctx.arc(cmd.cx, cmd.cy, cmd.radius, 0, Math.PI * 2);
            ctx.fill();
        } else if (cmd.op === "fill_text") {
            ctx.font = cmd.font_px + "px sans-serif";
            ctx.textAlign = cmd.align;
            ctx.fillText(cmd.text, cmd.x, cmd.y);
        }
    }
}

attach();
while (true) {
    const scene = await dioxus.recv();
    if (scene && scene.commands) {
        draw(scene);
    }
}
"#;

/// Owns the media engine bound to the `<video>` element. Commands carry a
/// session id; events are tagged with the session that produced them.
pub const MEDIA_ENGINE_SCRIPT: &str = r#"
const videoId = "player-video";
const libs = {
    hls: "https://cdn.jsdelivr.net/npm/hls.js@1/dist/hls.min.js",
    flv: "https://cdn.jsdelivr.net/npm/flv.js@1/dist/flv.min.js",
};
const libTimeoutMs = 15000;
const loaded = {};
let active = null;

function loadLib(name) {
    if (!loaded[name]) {
        loaded[name] = new Promise((resolve, reject) => {
            const script = document.createElement("script");
            const timer = setTimeout(() => {
                script.remove();
                reject(new Error("timed out loading " + name));
            }, libTimeoutMs);
            script.src = libs[name];
            script.onload = () => {
                clearTimeout(timer);
                resolve();
            };
            script.onerror = () => {
                clearTimeout(timer);
                script.remove();
                reject(new Error("failed to load " + name));
            };
            document.head.appendChild(script);
        }).catch((err) => {
            delete loaded[name];
            throw err;
        });
    }
    return loaded[name];
}

function video() {
    return document.getElementById(videoId);
}

function emit(session, kind, fields) {
    if (!active || active.session !== session) {
        return;
    }
    dioxus.send(Object.assign({ kind, session }, fields));
}

function bufferedRanges(el) {
    const ranges = [];
    for (let i = 0; i < el.buffered.length; i++) {
        ranges.push({ start: el.buffered.start(i), end: el.buffered.end(i) });
    }
    return ranges;
}

function listen(el, session, isLive) {
    const handlers = {
        timeupdate: () => emit(session, "time_update", { time: el.currentTime }),
        durationchange: () => emit(session, "duration_change", {
            duration: isFinite(el.duration) && el.duration > 0 ? el.duration : null,
        }),
        progress: () => emit(session, "buffered", { ranges: bufferedRanges(el) }),
        play: () => emit(session, "play_state", { playing: !el.paused }),
        pause: () => emit(session, "play_state", { playing: !el.paused }),
        error: () => emit(session, "error", {
            message: el.error ? "media error " + el.error.code : "media error",
            fatal: true,
        }),
    };
    handlers.loadedmetadata = handlers.durationchange;
    handlers.seeking = handlers.progress;
    handlers.seeked = handlers.progress;
    for (const [name, handler] of Object.entries(handlers)) {
        el.addEventListener(name, handler);
    }
    return () => {
        for (const [name, handler] of Object.entries(handlers)) {
            el.removeEventListener(name, handler);
        }
    };
}

function destroy() {
    if (!active) {
        return;
    }
    const current = active;
    active = null;
    current.unlisten();
    if (current.hls) {
        current.hls.destroy();
    }
    if (current.flv) {
        current.flv.unload();
        current.flv.detachMediaElement();
        current.flv.destroy();
    }
    const el = video();
    if (el) {
        el.pause();
        el.removeAttribute("src");
        el.load();
    }
}

async function attachHls(el, cmd) {
    await loadLib("hls");
    if (!active || active.session !== cmd.session) {
        return;
    }
    if (!window.Hls || !Hls.isSupported()) {
        if (el.canPlayType("application/vnd.apple.mpegurl")) {
            el.src = cmd.url;
        } else {
            emit(cmd.session, "error", { message: "HLS is not supported", fatal: true });
        }
        return;
    }
    const hls = new Hls({
        liveDurationInfinity: cmd.is_live,
        enableWorker: true,
        lowLatencyMode: cmd.is_live,
        backBufferLength: 90,
    });
    active.hls = hls;
    hls.loadSource(cmd.url);
    hls.attachMedia(el);
    hls.on(Hls.Events.MANIFEST_PARSED, () => el.play().catch(() => {}));
    hls.on(Hls.Events.ERROR, (_, data) => {
        emit(cmd.session, "error", { message: "hls: " + data.details, fatal: !!data.fatal });
        if (!data.fatal) {
            return;
        }
        if (data.type === Hls.ErrorTypes.NETWORK_ERROR) {
            hls.startLoad();
        } else if (data.type === Hls.ErrorTypes.MEDIA_ERROR) {
            hls.recoverMediaError();
        } else {
            hls.destroy();
            if (active) {
                active.hls = null;
            }
        }
    });
}

async function attachFlv(el, cmd) {
    await loadLib("flv");
    if (!active || active.session !== cmd.session) {
        return;
    }
    if (!window.flvjs || !flvjs.isSupported()) {
        emit(cmd.session, "error", { message: "FLV is not supported", fatal: true });
        return;
    }
    const flv = flvjs.createPlayer(
        { type: "flv", url: cmd.url, isLive: cmd.is_live, hasAudio: true, hasVideo: true, cors: true },
        { enableStashBuffer: false, stashInitialSize: 128, enableWorker: true, lazyLoad: false, seekType: "range" },
    );
    active.flv = flv;
    flv.attachMediaElement(el);
    flv.load();
    flv.on(flvjs.Events.ERROR, (type, detail) => {
        emit(cmd.session, "error", { message: "flv: " + type + " " + detail, fatal: false });
        flv.unload();
        flv.load();
        el.play().catch(() => {});
    });
    el.play().catch(() => {});
}

async function load(cmd) {
    destroy();
    const el = video();
    if (!el) {
        return;
    }
    active = { session: cmd.session, hls: null, flv: null, unlisten: listen(el, cmd.session, cmd.is_live) };
    if (cmd.is_live) {
        el.autoplay = true;
        el.playsInline = true;
    }
    try {
        if (cmd.engine === "hls") {
            await attachHls(el, cmd);
        } else if (cmd.engine === "flv") {
            await attachFlv(el, cmd);
        } else {
            el.src = cmd.url;
            if (cmd.is_live) {
                el.addEventListener("loadedmetadata", () => {
                    if (isFinite(el.duration)) {
                        el.currentTime = el.duration;
                    }
                }, { once: true });
            }
        }
    } catch (err) {
        emit(cmd.session, "error", { message: String(err), fatal: true });
    }
}

while (true) {
    const cmd = await dioxus.recv();
    if (!cmd) {
        continue;
    }
    if (cmd.kind === "load") {
        // Not awaited: seek, pause and destroy must not queue behind a
        // library download. Stale loads bail on their session check.
        load(cmd);
        continue;
    }
    if (!active || active.session !== cmd.session) {
        continue;
    }
    const el = video();
    if (cmd.kind === "destroy") {
        destroy();
    } else if (el && cmd.kind === "seek") {
        el.currentTime = cmd.time;
    } else if (el && cmd.kind === "play") {
        el.play().catch(() => {});
    } else if (el && cmd.kind === "pause") {
        el.pause();
    }
}
"#;
